//! JSON file backed item store
//!
//! The collection lives in a single pretty-printed JSON array. Its
//! modification time is the staleness signal.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{ItemStore, StalenessSignal, StorageError};
use crate::models::Item;

/// Item store over one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the new contents are written to before being renamed
    /// over the data file, so readers never observe a partial write.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn read_all(&self) -> Result<Vec<Item>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;
        let items: Vec<Item> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Read(e.to_string()))?;
        debug!(path = %self.path.display(), count = items.len(), "Read item collection");
        Ok(items)
    }

    async fn write_all(&self, items: &[Item]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string_pretty(items).map_err(|e| StorageError::Write(e.to_string()))?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, raw)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        debug!(path = %self.path.display(), count = items.len(), "Wrote item collection");
        Ok(())
    }

    async fn staleness_signal(&self) -> Result<StalenessSignal, StorageError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| StorageError::Metadata(e.to_string()))?;
        metadata
            .modified()
            .map_err(|e| StorageError::Metadata(e.to_string()))
    }
}
