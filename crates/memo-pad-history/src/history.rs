/// Two-stack undo/redo history, generic over the stored memento and the
/// storage used for the undo side.
use crate::error::{EditorError, HistoryKind};
use crate::ring::RingBuffer;

/// Storage for the undo side of a [`History`].
///
/// Implemented by `Vec` (unbounded) and [`RingBuffer`] (bounded, evicts the
/// oldest entry when full).
pub trait UndoStack<T> {
    fn push(&mut self, value: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> UndoStack<T> for Vec<T> {
    fn push(&mut self, value: T) {
        Vec::push(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T> UndoStack<T> for RingBuffer<T> {
    fn push(&mut self, value: T) {
        if self.push_back(value).is_some() {
            tracing::debug!(
                capacity = self.capacity(),
                "Undo history full, evicted oldest entry"
            );
        }
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_back()
    }

    fn len(&self) -> usize {
        RingBuffer::len(self)
    }

    fn clear(&mut self) {
        RingBuffer::clear(self);
    }
}

/// Undo and redo stacks of mementos.
///
/// The redo stack is always an unbounded `Vec`. It can only grow through
/// undo, so its size is naturally capped by what the undo side retains.
#[derive(Debug, Clone)]
pub struct History<M, U = Vec<M>> {
    undo: U,
    redo: Vec<M>,
}

impl<M> Default for History<M> {
    fn default() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }
}

impl<M, U: UndoStack<M>> History<M, U> {
    /// Creates a history with an empty redo stack.
    pub fn new(undo: U) -> Self {
        Self::from_parts(undo, Vec::new())
    }

    /// Assembles a history from existing stacks.
    pub fn from_parts(undo: U, redo: Vec<M>) -> Self {
        Self { undo, redo }
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    /// The undo storage.
    pub fn undo_stack(&self) -> &U {
        &self.undo
    }

    /// The redo stack, bottom first.
    pub fn redo_stack(&self) -> &[M] {
        &self.redo
    }

    /// Records the state before a new change. Clears the redo stack.
    pub fn record(&mut self, current: M) {
        self.undo.push(current);
        self.redo.clear();
    }

    /// Pops the most recent undo entry.
    ///
    /// `swap` receives that entry, installs it as the live state and returns
    /// the state it replaced, which goes onto the redo stack. Fails without
    /// calling `swap` when the undo stack is empty.
    pub fn undo(&mut self, swap: impl FnOnce(M) -> M) -> Result<(), EditorError> {
        let previous = self
            .undo
            .pop()
            .ok_or(EditorError::NoHistory(HistoryKind::Undo))?;
        self.redo.push(swap(previous));
        Ok(())
    }

    /// Pops the most recent redo entry. Mirror image of [`History::undo`].
    pub fn redo(&mut self, swap: impl FnOnce(M) -> M) -> Result<(), EditorError> {
        let next = self
            .redo
            .pop()
            .ok_or(EditorError::NoHistory(HistoryKind::Redo))?;
        self.undo.push(swap(next));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
