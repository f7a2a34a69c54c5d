/// Snapshot and serialized editor state types.
use serde::{Deserialize, Serialize};

/// Immutable capture of an editor's content at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    content: String,
}

impl Snapshot {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// The captured content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consumes the snapshot, returning the captured content.
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Full state of an editor, as stored by the persistence layer.
///
/// Histories are stored bottom-first: `undo[0]` is the oldest retained
/// snapshot and `redo.last()` is the next state a redo would restore.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorState {
    /// Current content.
    pub content: String,
    /// Undo history, oldest first.
    pub undo: Vec<Snapshot>,
    /// Redo history, bottom of the stack first.
    pub redo: Vec<Snapshot>,
    /// Ring capacity of the undo history. `None` for unbounded editors.
    pub capacity: Option<usize>,
}
