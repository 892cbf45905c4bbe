use super::backend::StorageBackend;
use crate::error::{BumoError, Result};
use crate::model::{Collection, Document};
use crate::seed::seed_document;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// State guarded by the store's write lock.
#[derive(Debug, Default)]
struct IdState {
    last_issued: u64,
}

/// One load-mutate-save cycle in progress.
///
/// Handed to the closure passed to [`DocumentStore::transact`]; the write lock
/// is held for the whole lifetime of the transaction.
pub struct Transaction<'a> {
    pub document: Document,
    ids: &'a mut IdState,
}

impl Transaction<'_> {
    /// Allocate a record id for `collection`.
    ///
    /// Ids are millisecond timestamps, strictly increasing within the process
    /// and bumped past any id already present in the collection.
    pub fn next_id(&mut self, collection: Collection) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut candidate = now.max(self.ids.last_issued + 1);

        let taken: HashSet<&str> = self
            .document
            .records(collection)
            .iter()
            .map(|record| record.id())
            .collect();
        while taken.contains(candidate.to_string().as_str()) {
            candidate += 1;
        }

        self.ids.last_issued = candidate;
        candidate.to_string()
    }
}

/// The durable, whole-document store.
///
/// Every read goes back to the backend (no caching). Every write replaces the
/// whole document atomically. All access is serialized through one mutex, so
/// concurrent load-mutate-save cycles within a process cannot lose updates.
/// Separate processes sharing the same file are not coordinated.
pub struct DocumentStore<B: StorageBackend> {
    /// Exposed as pub(crate) so the asset manager can share the same backend.
    pub(crate) backend: B,
    lock: Mutex<IdState>,
}

impl<B: StorageBackend> DocumentStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(IdState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn acquire(&self) -> MutexGuard<'_, IdState> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the current document, seeding the store on first run.
    pub fn load(&self) -> Result<Document> {
        let _guard = self.acquire();
        self.read()
    }

    /// Replace the stored document.
    pub fn save(&self, document: &Document) -> Result<()> {
        let _guard = self.acquire();
        self.write(document)
    }

    /// Run `f` against a freshly loaded document under the lock, without saving.
    pub fn inspect<T>(&self, f: impl FnOnce(&Document) -> Result<T>) -> Result<T> {
        let _guard = self.acquire();
        let document = self.read()?;
        f(&document)
    }

    /// Load, mutate, save, all under the write lock.
    ///
    /// The document is saved only if `f` returns `Ok`; an error from `f` or
    /// from the save leaves the stored document as it was.
    pub fn transact<T>(&self, f: impl FnOnce(&mut Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut guard = self.acquire();
        let document = self.read()?;
        let mut tx = Transaction {
            document,
            ids: &mut *guard,
        };
        let out = f(&mut tx)?;
        self.write(&tx.document)?;
        Ok(out)
    }

    fn read(&self) -> Result<Document> {
        match self.backend.read_document()? {
            Some(raw) => {
                let document: Document =
                    serde_json::from_str(&raw).map_err(BumoError::CorruptDocument)?;
                debug!(bytes = raw.len(), "document loaded");
                Ok(document)
            }
            None => {
                let seed = seed_document(Utc::now());
                self.write(&seed)?;
                info!("no document found, wrote seed content");
                Ok(seed)
            }
        }
    }

    fn write(&self, document: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(document).map_err(BumoError::CorruptDocument)?;
        self.backend.write_document(&content)?;
        debug!(bytes = content.len(), "document saved");
        Ok(())
    }
}
