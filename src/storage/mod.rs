//! Storage Module
//!
//! The item collection's backing store and the staleness signal the
//! statistics cache validates against.

mod json_file;
mod memory;

use std::time::SystemTime;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Item;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Version marker of the backing collection.
///
/// The cache assumes the collection changes if and only if this value
/// changes; nothing here verifies that.
pub type StalenessSignal = SystemTime;

// == Storage Error ==
/// Failure of the backing store. Displays the raw underlying message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Collection could not be read or parsed
    #[error("{0}")]
    Read(String),

    /// Collection could not be written
    #[error("{0}")]
    Write(String),

    /// Staleness signal (file metadata) could not be obtained
    #[error("{0}")]
    Metadata(String),
}

// == Item Store ==
/// Persistence collaborator for the item collection.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Reads the whole collection, in insertion order.
    async fn read_all(&self) -> Result<Vec<Item>, StorageError>;

    /// Replaces the whole collection.
    async fn write_all(&self, items: &[Item]) -> Result<(), StorageError>;

    /// Current version of the collection.
    async fn staleness_signal(&self) -> Result<StalenessSignal, StorageError>;
}
