use crate::error::Result;
use chrono::{DateTime, Utc};

/// A file in the asset store, as seen by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub modified: DateTime<Utc>,
}

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `DocumentStore` and `AssetManager` handle the "what".
///
/// Backends are shared across threads, so every method takes `&self`.
pub trait StorageBackend: Send + Sync {
    // --- Document Operations ---

    /// Read the raw document text.
    /// Returns Ok(None) if it does not exist yet (first run).
    fn read_document(&self) -> Result<Option<String>>;

    /// Replace the whole document.
    /// MUST be atomic (write to tmp then rename): on failure the previous
    /// document is left untouched.
    fn write_document(&self, content: &str) -> Result<()>;

    // --- Asset Operations ---

    /// Write a new asset under `name`. MUST be atomic as well.
    fn write_asset(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Read an asset. Returns Ok(None) if the file does not exist.
    fn read_asset(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Whether an asset exists, without reading its contents.
    fn asset_exists(&self, name: &str) -> Result<bool>;

    /// Delete an asset. Returns Ok(false) if there was nothing to delete.
    fn delete_asset(&self, name: &str) -> Result<bool>;

    /// List everything in the asset store, including leftover temp files.
    fn list_assets(&self) -> Result<Vec<AssetEntry>>;
}
