/// Editor session: one versioned editor bound to a document ID, with
/// optional persistence of its full state.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::HistoryConfig;
use crate::editor::{LimitedVersionedEditor, VersionedEditor, VersionedText};
use crate::error::EditorError;
use crate::persistence::PersistenceLayer;
use crate::snapshot::EditorState;

/// Builds the editor variant selected by `config`, restoring `state` if given.
///
/// A state saved under a different ring capacity is adapted: a smaller ring
/// keeps only the most recent undo steps.
pub fn build_editor(config: &HistoryConfig, state: Option<EditorState>) -> Box<dyn VersionedText> {
    if let Some(state) = &state {
        let configured = config.undo_capacity.map(|c| c.get());
        if state.capacity != configured {
            tracing::debug!(
                stored = ?state.capacity,
                configured = ?configured,
                "Restoring editor under a different undo capacity"
            );
        }
    }

    match (config.undo_capacity, state) {
        (Some(capacity), Some(state)) => {
            Box::new(LimitedVersionedEditor::from_state(capacity, state))
        }
        (Some(capacity), None) => Box::new(LimitedVersionedEditor::new(capacity)),
        (None, Some(state)) => Box::new(VersionedEditor::from_state(state)),
        (None, None) => Box::new(VersionedEditor::new()),
    }
}

/// Manages the editor for a single document.
///
/// Both undo and redo histories are persisted, so a reloaded session can
/// still redo what was undone before it was closed.
pub struct EditorSession {
    editor: Box<dyn VersionedText>,
    /// Document identifier used as the persistence key.
    doc_id: String,
    config: HistoryConfig,
    /// Optional disk persistence (None = in-memory only).
    persistence: Option<Arc<PersistenceLayer>>,
    /// Whether the editor has changed since the last flush.
    dirty: bool,
    /// Number of operations applied over the document's lifetime.
    revision: u64,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("doc_id", &self.doc_id)
            .field("undo_count", &self.editor.undo_count())
            .field("redo_count", &self.editor.redo_count())
            .field("revision", &self.revision)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl EditorSession {
    /// Creates a session with an empty editor.
    ///
    /// Pass `persistence: None` for in-memory-only mode.
    pub fn new(
        doc_id: String,
        config: HistoryConfig,
        persistence: Option<Arc<PersistenceLayer>>,
    ) -> Self {
        Self {
            editor: build_editor(&config, None),
            doc_id,
            config,
            persistence,
            dirty: false,
            revision: 0,
        }
    }

    /// Creates an in-memory-only session with default config.
    pub fn in_memory() -> Self {
        Self::new(String::from("memory"), HistoryConfig::default(), None)
    }

    /// Loads the stored editor for `doc_id`, or starts an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistence layer fails to read.
    pub fn load_or_new(
        doc_id: String,
        config: HistoryConfig,
        persistence: Option<Arc<PersistenceLayer>>,
    ) -> Result<Self> {
        let (state, revision) = match &persistence {
            Some(pl) => {
                let state = pl
                    .load_state(&doc_id)
                    .context("Failed to load editor state")?;
                let revision = pl
                    .load_revision(&doc_id)
                    .context("Failed to load document metadata")?
                    .unwrap_or(0);
                (state, revision)
            }
            None => (None, 0),
        };

        if state.is_some() {
            tracing::debug!(doc_id = %doc_id, revision, "Restored editor session");
        }

        Ok(Self {
            editor: build_editor(&config, state),
            doc_id,
            config,
            persistence,
            dirty: false,
            revision,
        })
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Read access to the underlying editor.
    pub fn editor(&self) -> &dyn VersionedText {
        self.editor.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// Replaces the editor content.
    pub fn change_content(&mut self, content: &str) {
        self.editor.change_content(content);
        self.mark_changed();
    }

    /// # Errors
    ///
    /// Returns [`EditorError::NoHistory`] if there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        self.editor.undo()?;
        self.mark_changed();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`EditorError::NoHistory`] if there is nothing to redo.
    pub fn redo(&mut self) -> Result<(), EditorError> {
        self.editor.redo()?;
        self.mark_changed();
        Ok(())
    }

    /// Writes the editor state to disk.
    ///
    /// No-op if the session is in-memory-only or nothing has changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the disk write fails.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(pl) = &self.persistence {
            pl.save_state(&self.doc_id, &self.editor.to_state(), self.revision)
                .context("Failed to flush editor state to disk")?;
            self.dirty = false;
        }
        Ok(())
    }

    /// Resets the session to an empty editor and removes the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if disk cleanup fails.
    pub fn delete_history(&mut self) -> Result<()> {
        self.editor = build_editor(&self.config, None);
        self.dirty = false;
        self.revision = 0;

        if let Some(pl) = &self.persistence {
            pl.delete_document(&self.doc_id)
                .context("Failed to delete editor state from disk")?;
        }
        Ok(())
    }
}
