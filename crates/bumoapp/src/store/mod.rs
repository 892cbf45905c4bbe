//! # Storage Layer
//!
//! Bumo persists everything in one JSON document plus a directory of uploads.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw I/O, the "how". Reads and atomically
//!   replaces the document, writes/reads/deletes/lists upload files.
//!   - [`fs_backend::FsBackend`]: production, on disk.
//!   - [`mem_backend::MemBackend`]: testing, with write-failure simulation.
//! - [`document::DocumentStore`]: the durable document, the "what". Seeds on
//!   first run, serializes every load-mutate-save cycle behind one lock.
//! - [`repository::CollectionRepository`]: list/get/create/update/delete for
//!   one collection, built on `DocumentStore::transact`.
//!
//! ## Whole-Document Writes
//!
//! There is no partial update. Every mutation loads the whole document,
//! changes it in memory, and writes it back:
//!
//! 1. Serialize to a temp file next to `data.json` (`.data-{uuid}.tmp`).
//! 2. `fsync` the temp file.
//! 3. `rename` it over `data.json`.
//!
//! A crash at any step leaves either the old or the new document, never a mix.
//!
//! ## Concurrency
//!
//! `DocumentStore` holds a mutex for the full cycle, so two writers in the same
//! process cannot overwrite each other's changes. Two processes pointed at the
//! same data root are not coordinated; run one server per data root.
//!
//! ## Storage Layout
//!
//! ```text
//! <data root>/
//! ├── data.json       # The document
//! ├── bumo.toml       # Optional configuration
//! └── uploads/        # Asset files: {millis}-{random}{.ext}
//! ```

pub mod backend;
pub mod document;
pub mod fs_backend;
pub mod mem_backend;
pub mod repository;

pub use backend::{AssetEntry, StorageBackend};
pub use document::{DocumentStore, Transaction};
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use repository::CollectionRepository;

/// Production store.
pub type FileStore = DocumentStore<FsBackend>;

/// Testing store.
pub type InMemoryStore = DocumentStore<MemBackend>;

impl FileStore {
    pub fn new_fs(root: std::path::PathBuf) -> Self {
        DocumentStore::with_backend(FsBackend::new(root))
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        DocumentStore::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
