use super::backend::{AssetEntry, StorageBackend};
use crate::error::{BumoError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
struct AssetBlob {
    bytes: Vec<u8>,
    modified: DateTime<Utc>,
}

/// In-memory storage backend for testing.
///
/// Uses `Mutex` rather than `RefCell` because `StorageBackend` must be `Sync`:
/// the record service is shared across request threads.
#[derive(Default)]
pub struct MemBackend {
    document: Mutex<Option<String>>,
    assets: Mutex<BTreeMap<String, AssetBlob>>,
    fail_document_writes: AtomicBool,
    fail_asset_writes: AtomicBool,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn simulated_failure() -> BumoError {
    BumoError::StorageUnavailable(io::Error::other("simulated write failure"))
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing raw document.
    pub fn with_document(content: &str) -> Self {
        let backend = Self::default();
        *locked(&backend.document) = Some(content.to_string());
        backend
    }

    /// Make every document write fail, leaving the stored document untouched.
    pub fn set_fail_document_writes(&self, fail: bool) {
        self.fail_document_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every asset write fail before anything is stored.
    pub fn set_fail_asset_writes(&self, fail: bool) {
        self.fail_asset_writes.store(fail, Ordering::SeqCst);
    }

    /// Test helper to age an asset for sweep tests.
    /// Returns true if the asset existed and was updated.
    pub fn set_asset_modified(&self, name: &str, modified: DateTime<Utc>) -> bool {
        match locked(&self.assets).get_mut(name) {
            Some(blob) => {
                blob.modified = modified;
                true
            }
            None => false,
        }
    }

    /// The raw document as last written.
    pub fn raw_document(&self) -> Option<String> {
        locked(&self.document).clone()
    }

    pub fn asset_names(&self) -> Vec<String> {
        locked(&self.assets).keys().cloned().collect()
    }
}

impl StorageBackend for MemBackend {
    fn read_document(&self) -> Result<Option<String>> {
        Ok(locked(&self.document).clone())
    }

    fn write_document(&self, content: &str) -> Result<()> {
        if self.fail_document_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        *locked(&self.document) = Some(content.to_string());
        Ok(())
    }

    fn write_asset(&self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_asset_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        locked(&self.assets).insert(
            name.to_string(),
            AssetBlob {
                bytes: bytes.to_vec(),
                modified: Utc::now(),
            },
        );
        Ok(())
    }

    fn read_asset(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(locked(&self.assets).get(name).map(|blob| blob.bytes.clone()))
    }

    fn asset_exists(&self, name: &str) -> Result<bool> {
        Ok(locked(&self.assets).contains_key(name))
    }

    fn delete_asset(&self, name: &str) -> Result<bool> {
        Ok(locked(&self.assets).remove(name).is_some())
    }

    fn list_assets(&self) -> Result<Vec<AssetEntry>> {
        Ok(locked(&self.assets)
            .iter()
            .map(|(name, blob)| AssetEntry {
                name: name.clone(),
                modified: blob.modified,
            })
            .collect())
    }
}
