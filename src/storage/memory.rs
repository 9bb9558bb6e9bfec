//! In-memory item store
//!
//! Holds the collection and an explicitly controlled staleness signal.
//! Used for tests and for wiring the service without a data file.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, UNIX_EPOCH};

use async_trait::async_trait;

use super::{ItemStore, StalenessSignal, StorageError};
use crate::models::Item;

#[derive(Debug)]
struct State {
    items: Vec<Item>,
    signal: StalenessSignal,
    read_failure: Option<String>,
    write_failure: Option<String>,
    signal_failure: Option<String>,
}

/// In-memory store whose staleness signal only moves when told to, or by
/// one millisecond on every successful write.
///
/// # Example
///
/// ```ignore
/// let store = MemoryStore::new().with_items(items).with_signal_secs(100);
/// store.fail_reads("disk unplugged");
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
    reads: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                items: Vec::new(),
                signal: UNIX_EPOCH,
                read_failure: None,
                write_failure: None,
                signal_failure: None,
            }),
            reads: AtomicUsize::new(0),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_items(self, items: Vec<Item>) -> Self {
        self.lock().items = items;
        self
    }

    /// Sets the signal to `secs` seconds after the Unix epoch.
    #[must_use]
    pub fn with_signal_secs(self, secs: u64) -> Self {
        self.set_signal_secs(secs);
        self
    }

    pub fn set_signal_secs(&self, secs: u64) {
        self.lock().signal = UNIX_EPOCH + Duration::from_secs(secs);
    }

    /// Replaces the collection without moving the signal.
    pub fn replace_items(&self, items: Vec<Item>) {
        self.lock().items = items;
    }

    pub fn fail_reads(&self, message: impl Into<String>) {
        self.lock().read_failure = Some(message.into());
    }

    pub fn fail_writes(&self, message: impl Into<String>) {
        self.lock().write_failure = Some(message.into());
    }

    pub fn fail_signal(&self, message: impl Into<String>) {
        self.lock().signal_failure = Some(message.into());
    }

    /// Clears every injected failure.
    pub fn recover(&self) {
        let mut state = self.lock();
        state.read_failure = None;
        state.write_failure = None;
        state.signal_failure = None;
    }

    /// Number of `read_all` calls made so far, failed ones included.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<Item>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        match &state.read_failure {
            Some(message) => Err(StorageError::Read(message.clone())),
            None => Ok(state.items.clone()),
        }
    }

    async fn write_all(&self, items: &[Item]) -> Result<(), StorageError> {
        let mut state = self.lock();
        if let Some(message) = &state.write_failure {
            return Err(StorageError::Write(message.clone()));
        }
        state.items = items.to_vec();
        state.signal += Duration::from_millis(1);
        Ok(())
    }

    async fn staleness_signal(&self) -> Result<StalenessSignal, StorageError> {
        let state = self.lock();
        match &state.signal_failure {
            Some(message) => Err(StorageError::Metadata(message.clone())),
            None => Ok(state.signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_reads() {
        let store = MemoryStore::new();
        store.read_all().await.unwrap();
        store.read_all().await.unwrap();
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_write_bumps_signal() {
        let store = MemoryStore::new().with_signal_secs(10);
        let before = store.staleness_signal().await.unwrap();
        store.write_all(&[]).await.unwrap();
        assert!(store.staleness_signal().await.unwrap() > before);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.fail_reads("File not found");
        store.fail_signal("Stat failed");

        assert_eq!(
            store.read_all().await,
            Err(StorageError::Read("File not found".to_string()))
        );
        assert_eq!(
            store.staleness_signal().await,
            Err(StorageError::Metadata("Stat failed".to_string()))
        );

        store.recover();
        assert!(store.read_all().await.is_ok());
    }
}
