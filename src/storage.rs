//! Snapshot persistence boundary
//!
//! The store itself never touches disk. After every mutation it hands a
//! [`PersistedSnapshot`] to a [`SnapshotStore`], fire-and-forget: a failed
//! save is logged by the collaborator and never propagates into store
//! operations. Likewise a failed load yields `None` and the app proceeds
//! with a fresh default state.
//!
//! [`JsonFileStore`] is the bundled implementation: one JSON blob under a
//! fixed, versioned key name.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::models::PersistedSnapshot;

/// Versioned storage key. Bump the suffix when the snapshot schema breaks.
pub const STORAGE_KEY: &str = "wordstreak-store-v2";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A generic key-value blob store for snapshots.
pub trait SnapshotStore {
    /// Load the persisted snapshot, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedSnapshot>>;

    /// Replace the persisted snapshot.
    fn save(&self, snapshot: &PersistedSnapshot) -> Result<()>;
}

/// JSON-file-backed snapshot store.
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordstreak"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", STORAGE_KEY))
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedSnapshot>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &PersistedSnapshot) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        let json = serde_json::to_string(snapshot)?;
        fs::write(self.snapshot_path(), json)?;
        Ok(())
    }
}
