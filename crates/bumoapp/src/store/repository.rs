use super::backend::StorageBackend;
use super::document::DocumentStore;
use crate::error::{BumoError, Result};
use crate::model::{Collection, Fields, Record};
use chrono::Utc;

/// CRUD over one collection of the shared document.
///
/// A cheap, borrowed view: every operation is a full load-mutate-save cycle
/// through [`DocumentStore::transact`], nothing is cached here.
pub struct CollectionRepository<'a, B: StorageBackend> {
    store: &'a DocumentStore<B>,
    collection: Collection,
}

impl<'a, B: StorageBackend> CollectionRepository<'a, B> {
    pub fn new(store: &'a DocumentStore<B>, collection: Collection) -> Self {
        Self { store, collection }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    fn not_found(&self, id: &str) -> BumoError {
        BumoError::NotFound {
            collection: self.collection,
            id: id.to_string(),
        }
    }

    /// All records, in stored order.
    pub fn list(&self) -> Result<Vec<Record>> {
        let mut document = self.store.load()?;
        Ok(document.take(self.collection))
    }

    pub fn get(&self, id: &str) -> Result<Record> {
        self.list()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| self.not_found(id))
    }

    /// Append `{id, ...fields, createdAt}` and return it.
    pub fn create(&self, fields: Fields) -> Result<Record> {
        let collection = self.collection;
        self.store.transact(|tx| {
            let id = tx.next_id(collection);
            let record = Record::new(id, fields, Utc::now());
            tx.document.records_mut(collection).push(record.clone());
            Ok(record)
        })
    }

    /// Shallow-merge `fields` over the record with `id`.
    pub fn update(&self, id: &str, fields: Fields) -> Result<Record> {
        self.update_with(id, |record| record.merge(fields))
            .map(|(record, ())| record)
    }

    /// Apply `f` to the record with `id` and persist.
    ///
    /// Returns the updated record together with whatever `f` returned. If the
    /// record does not exist, fails with `NotFound` and nothing is written.
    pub fn update_with<T>(&self, id: &str, f: impl FnOnce(&mut Record) -> T) -> Result<(Record, T)> {
        let collection = self.collection;
        self.store.transact(|tx| {
            let record = tx
                .document
                .records_mut(collection)
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or_else(|| self.not_found(id))?;
            let out = f(record);
            Ok((record.clone(), out))
        })
    }

    /// Remove the record with `id`, returning it if it existed.
    ///
    /// Deleting a missing id is not an error.
    pub fn delete(&self, id: &str) -> Result<Option<Record>> {
        let collection = self.collection;
        self.store.transact(|tx| {
            let records = tx.document.records_mut(collection);
            Ok(records
                .iter()
                .position(|record| record.id() == id)
                .map(|index| records.remove(index)))
        })
    }
}
