/// Disk persistence layer backed by redb.
///
/// Uses a single redb database file with two tables:
/// - `editors`: serialized `EditorState` keyed by `doc_id`
/// - `meta`: per-document metadata keyed by `doc_id`
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::snapshot::EditorState;

/// Editors table: doc_id → bincode-serialized EditorState.
const EDITORS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("editors");

/// Metadata table: doc_id → bincode-serialized DocumentMeta.
const META_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");

/// Per-document metadata persisted alongside the editor state.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct DocumentMeta {
    revision: u64,
}

/// Persistence layer for editor sessions backed by redb.
///
/// Thread-safe: redb supports concurrent readers and serialized writers.
/// Shared across sessions via `Arc<PersistenceLayer>`.
pub struct PersistenceLayer {
    db: Database,
}

impl std::fmt::Debug for PersistenceLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceLayer").finish()
    }
}

impl PersistenceLayer {
    /// Opens or creates the history database in the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(data_dir: &Path) -> Result<Arc<Self>> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("history.redb");
        let db = Database::create(&db_path)
            .with_context(|| format!("Failed to open history database: {}", db_path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(EDITORS_TABLE)
                .context("Failed to create editors table")?;
            let _ = write_txn
                .open_table(META_TABLE)
                .context("Failed to create meta table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        tracing::debug!("Opened history database at {}", db_path.display());
        Ok(Arc::new(Self { db }))
    }

    /// Writes the editor state and its revision in one transaction.
    ///
    /// Overwrites any state previously stored for `doc_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write transaction fails.
    pub fn save_state(&self, doc_id: &str, state: &EditorState, revision: u64) -> Result<()> {
        let state_bytes = bincode::serialize(state).context("Failed to serialize editor state")?;
        let meta_bytes = bincode::serialize(&DocumentMeta { revision })
            .context("Failed to serialize document metadata")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(EDITORS_TABLE)
                .context("Failed to open editors table")?;
            table
                .insert(doc_id, state_bytes.as_slice())
                .context("Failed to insert editor state")?;
        }
        {
            let mut table = write_txn
                .open_table(META_TABLE)
                .context("Failed to open meta table")?;
            table
                .insert(doc_id, meta_bytes.as_slice())
                .context("Failed to insert metadata")?;
        }
        write_txn
            .commit()
            .context("Failed to commit write transaction")?;

        tracing::debug!(
            doc_id,
            revision,
            undo = state.undo.len(),
            redo = state.redo.len(),
            "Saved editor state"
        );
        Ok(())
    }

    /// Loads the stored editor state for a document.
    ///
    /// Returns `None` if nothing is stored for this document.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction or deserialization fails.
    pub fn load_state(&self, doc_id: &str) -> Result<Option<EditorState>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(EDITORS_TABLE)
            .context("Failed to open editors table")?;

        match table.get(doc_id).context("Failed to read editor state")? {
            Some(guard) => {
                let state: EditorState = bincode::deserialize(guard.value())
                    .context("Failed to deserialize editor state")?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Loads the revision counter for a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction or deserialization fails.
    pub fn load_revision(&self, doc_id: &str) -> Result<Option<u64>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(META_TABLE)
            .context("Failed to open meta table")?;

        match table.get(doc_id).context("Failed to read metadata")? {
            Some(guard) => {
                let meta: DocumentMeta = bincode::deserialize(guard.value())
                    .context("Failed to deserialize metadata")?;
                Ok(Some(meta.revision))
            }
            None => Ok(None),
        }
    }

    /// Removes the state and metadata of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn delete_document(&self, doc_id: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(EDITORS_TABLE)
                .context("Failed to open editors table")?;
            table
                .remove(doc_id)
                .context("Failed to remove editor state")?;
        }
        {
            let mut table = write_txn
                .open_table(META_TABLE)
                .context("Failed to open meta table")?;
            table.remove(doc_id).context("Failed to remove metadata")?;
        }
        write_txn.commit().context("Failed to commit deletion")?;
        Ok(())
    }

    /// Lists all document IDs with stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn list_documents(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(EDITORS_TABLE)
            .context("Failed to open editors table")?;

        let mut doc_ids = Vec::new();
        for entry in table.iter().context("Failed to iterate editors table")? {
            let (key_guard, _) = entry.context("Failed to read editors entry")?;
            doc_ids.push(key_guard.value().to_string());
        }
        Ok(doc_ids)
    }
}
