//! Versioned text editing with undo/redo history.
//!
//! Provides an unbounded `VersionedEditor`, a `LimitedVersionedEditor` whose
//! undo history is a fixed-capacity ring buffer, and a `Versioned` wrapper
//! that adds the same history to any `Originator`. Editor sessions can be
/// persisted per document in an embedded key-value store (redb).
pub mod config;
pub mod decorator;
pub mod editor;
pub mod error;
pub mod history;
pub mod persistence;
pub mod ring;
pub mod session;
pub mod snapshot;

pub use config::HistoryConfig;
pub use decorator::{Originator, TextEditor, Versioned};
pub use editor::{HistoryState, LimitedVersionedEditor, VersionedEditor, VersionedText};
pub use error::{EditorError, HistoryKind};
pub use history::{History, UndoStack};
pub use persistence::PersistenceLayer;
pub use ring::RingBuffer;
pub use session::{build_editor, EditorSession};
pub use snapshot::{EditorState, Snapshot};
