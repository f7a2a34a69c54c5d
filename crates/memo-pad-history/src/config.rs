/// Configuration and utility functions for the history system.
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MEMO_PAD_DATA_DIR";

/// Configuration for the history system.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Ring capacity of the undo history. `None` keeps every undo step.
    pub undo_capacity: Option<NonZeroUsize>,
    /// Root directory for the persistence database.
    pub data_dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            undo_capacity: None,
            data_dir: resolve_data_dir(),
        }
    }
}

impl HistoryConfig {
    /// Config for a bounded editor with `capacity` ring slots.
    ///
    /// A capacity of zero selects the unbounded editor.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_capacity: NonZeroUsize::new(capacity),
            ..Self::default()
        }
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `MEMO_PAD_DATA_DIR` environment variable
/// 2. The platform's local data directory, under `memo-pad/`
/// 3. `.data/` directory next to the executable
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join("memo-pad");
    }
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    exe.parent().unwrap_or(Path::new(".")).join(".data")
}

/// Generates a document ID for a file on disk.
///
/// Uses a hash of the canonical path for stability across sessions.
pub fn doc_id_for_path(path: &Path) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    format!("file-{:016x}", hasher.finish())
}

static UNSAVED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a unique document ID for a document with no backing file.
pub fn generate_unsaved_id() -> String {
    let count = UNSAVED_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("unsaved-{count}")
}
