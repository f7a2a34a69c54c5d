/// Versioned text editors: an unbounded one and a ring-buffer-bounded one.
use std::num::NonZeroUsize;

use crate::error::EditorError;
use crate::history::History;
use crate::ring::RingBuffer;
use crate::snapshot::{EditorState, Snapshot};

/// Whether an editor has a redo path available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Redo history is empty.
    Clean,
    /// At least one undo happened and no new change has cleared the redo path.
    Diverged,
}

/// Common interface of every versioned editor.
pub trait VersionedText {
    /// Current content.
    fn content(&self) -> &str;

    fn undo_count(&self) -> usize;

    fn redo_count(&self) -> usize;

    /// Replaces the content, recording the previous content as an undo step.
    fn change_content(&mut self, content: &str);

    /// Restores the previous content.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoHistory`] if there is nothing to undo.
    fn undo(&mut self) -> Result<(), EditorError>;

    /// Re-applies the most recently undone content.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoHistory`] if there is nothing to redo.
    fn redo(&mut self) -> Result<(), EditorError>;

    /// Captures the whole editor for persistence.
    fn to_state(&self) -> EditorState;

    fn can_undo(&self) -> bool {
        self.undo_count() > 0
    }

    fn can_redo(&self) -> bool {
        self.redo_count() > 0
    }

    fn state(&self) -> HistoryState {
        if self.can_redo() {
            HistoryState::Diverged
        } else {
            HistoryState::Clean
        }
    }
}

/// Swaps `content` with the snapshot's content, returning a snapshot of the
/// content that was replaced.
fn swap_content(content: &mut String, snapshot: Snapshot) -> Snapshot {
    Snapshot::new(std::mem::replace(content, snapshot.into_content()))
}

/// Editor with an unbounded undo history.
///
/// Setting the content to what it already is does not record anything.
#[derive(Debug, Clone, Default)]
pub struct VersionedEditor {
    content: String,
    history: History<Snapshot>,
}

impl VersionedEditor {
    /// Creates an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor with initial content and no history.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            history: History::default(),
        }
    }

    /// Rebuilds an editor from a persisted state.
    pub fn from_state(state: EditorState) -> Self {
        Self {
            content: state.content,
            history: History::from_parts(state.undo, state.redo),
        }
    }
}

impl VersionedText for VersionedEditor {
    fn content(&self) -> &str {
        &self.content
    }

    fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    fn change_content(&mut self, content: &str) {
        if content == self.content {
            return;
        }
        let previous = std::mem::replace(&mut self.content, content.to_owned());
        self.history.record(Snapshot::new(previous));
    }

    fn undo(&mut self) -> Result<(), EditorError> {
        let content = &mut self.content;
        self.history.undo(|prev| swap_content(content, prev))
    }

    fn redo(&mut self) -> Result<(), EditorError> {
        let content = &mut self.content;
        self.history.redo(|next| swap_content(content, next))
    }

    fn to_state(&self) -> EditorState {
        EditorState {
            content: self.content.clone(),
            undo: self.history.undo_stack().clone(),
            redo: self.history.redo_stack().to_vec(),
            capacity: None,
        }
    }
}

/// Editor whose undo history is a fixed-capacity ring buffer.
///
/// A ring of `capacity` slots retains at most `capacity - 1` undo steps;
/// older steps are evicted and become unreachable. Unlike
/// [`VersionedEditor`], setting the content to its current value still
/// records an undo step.
#[derive(Debug, Clone)]
pub struct LimitedVersionedEditor {
    content: String,
    history: History<Snapshot, RingBuffer<Snapshot>>,
}

impl LimitedVersionedEditor {
    /// Creates an empty editor with a ring of `capacity` slots.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_content(capacity, String::new())
    }

    /// Creates an editor with initial content and no history.
    pub fn with_content(capacity: NonZeroUsize, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            history: History::new(RingBuffer::new(capacity)),
        }
    }

    /// Rebuilds an editor from a persisted state.
    ///
    /// If the stored undo history is deeper than this ring can hold, the
    /// oldest entries are dropped.
    pub fn from_state(capacity: NonZeroUsize, state: EditorState) -> Self {
        let mut ring = RingBuffer::new(capacity);
        for snapshot in state.undo {
            ring.push_back(snapshot);
        }
        Self {
            content: state.content,
            history: History::from_parts(ring, state.redo),
        }
    }

    /// Number of slots in the undo ring.
    pub fn capacity(&self) -> usize {
        self.history.undo_stack().capacity()
    }

    /// Deepest undo history the editor can retain.
    pub fn max_undo_depth(&self) -> usize {
        self.history.undo_stack().max_len()
    }
}

impl VersionedText for LimitedVersionedEditor {
    fn content(&self) -> &str {
        &self.content
    }

    fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    fn change_content(&mut self, content: &str) {
        let previous = std::mem::replace(&mut self.content, content.to_owned());
        self.history.record(Snapshot::new(previous));
    }

    fn undo(&mut self) -> Result<(), EditorError> {
        let content = &mut self.content;
        self.history.undo(|prev| swap_content(content, prev))
    }

    fn redo(&mut self) -> Result<(), EditorError> {
        let content = &mut self.content;
        self.history.redo(|next| swap_content(content, next))
    }

    fn to_state(&self) -> EditorState {
        EditorState {
            content: self.content.clone(),
            undo: self.history.undo_stack().iter().cloned().collect(),
            redo: self.history.redo_stack().to_vec(),
            capacity: Some(self.capacity()),
        }
    }
}
