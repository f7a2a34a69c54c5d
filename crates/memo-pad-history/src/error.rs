/// Errors returned by editor history operations.
use thiserror::Error;

/// Which history an operation tried to pop from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

/// Editor error.
///
/// Raised before any state is touched, so a failed operation leaves the
/// editor exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    #[error("No more states to {0}")]
    NoHistory(HistoryKind),
}

impl EditorError {
    /// The history that was empty.
    pub fn kind(&self) -> HistoryKind {
        match self {
            Self::NoHistory(kind) => *kind,
        }
    }
}
