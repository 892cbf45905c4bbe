//! # API Facade
//!
//! [`RecordService`] is the single entry point for record operations, whatever
//! sits in front of it (the `bumo` CLI, an HTTP router, tests).
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Owns** the shared [`DocumentStore`] and the upload policy
//! - **Dispatches** to the command functions in [`crate::commands`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! For `reports` and `articles` every operation is a passthrough to the
//! collection repository. For `documentation`, `alumni` and `structure` the
//! command layer wraps create/update/delete with upload handling.
//!
//! ## Sharing
//!
//! Every method takes `&self`. Wrap the service in an `Arc` and hand clones to
//! request handlers; writes are serialized inside the store.

use crate::assets::{AssetManager, AssetPolicy, Upload};
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{Collection, Fields, Record};
use crate::store::backend::StorageBackend;
use crate::store::{CollectionRepository, DocumentStore};
use chrono::Duration;

pub struct RecordService<B: StorageBackend> {
    store: DocumentStore<B>,
    policy: AssetPolicy,
    orphan_grace: Duration,
}

impl<B: StorageBackend> RecordService<B> {
    pub fn new(store: DocumentStore<B>, policy: AssetPolicy) -> Self {
        Self {
            store,
            policy,
            orphan_grace: Duration::minutes(5),
        }
    }

    pub fn with_orphan_grace(mut self, grace: Duration) -> Self {
        self.orphan_grace = grace;
        self
    }

    pub fn store(&self) -> &DocumentStore<B> {
        &self.store
    }

    pub fn assets(&self) -> AssetManager<'_, B> {
        AssetManager::new(self.store.backend(), &self.policy)
    }

    pub fn list(&self, collection: Collection) -> Result<CmdResult> {
        commands::list::run(&self.store, collection)
    }

    pub fn get(&self, collection: Collection, id: &str) -> Result<Record> {
        CollectionRepository::new(&self.store, collection).get(id)
    }

    pub fn create(
        &self,
        collection: Collection,
        fields: Fields,
        upload: Option<&Upload>,
    ) -> Result<CmdResult> {
        commands::create::run(&self.store, &self.assets(), collection, fields, upload)
    }

    pub fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
        upload: Option<&Upload>,
    ) -> Result<CmdResult> {
        commands::update::run(&self.store, &self.assets(), collection, id, fields, upload)
    }

    pub fn delete(&self, collection: Collection, id: &str) -> Result<CmdResult> {
        commands::delete::run(&self.store, &self.assets(), collection, id)
    }

    pub fn doctor(&self) -> Result<CmdResult> {
        commands::doctor::run(&self.store, &self.assets(), self.orphan_grace)
    }

    pub fn read_asset(&self, reference: &str) -> Result<Vec<u8>> {
        self.assets().read(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn service() -> RecordService<MemBackend> {
        RecordService::new(InMemoryStore::new(), AssetPolicy::default())
    }

    #[test]
    fn list_dispatches_per_collection() {
        let service = service();
        assert_eq!(service.list(Collection::Structure).unwrap().listed_records.len(), 4);
        assert_eq!(service.list(Collection::Reports).unwrap().listed_records.len(), 1);
    }

    #[test]
    fn create_and_get_round_trip() {
        let service = service();
        let mut fields = Fields::new();
        fields.insert("title".into(), json!("Rapat"));

        let created = service.create(Collection::Articles, fields, None).unwrap();
        let id = created.affected_records[0].id().to_string();

        assert_eq!(
            service.get(Collection::Articles, &id).unwrap().get("title"),
            Some(&json!("Rapat"))
        );
    }

    #[test]
    fn read_asset_returns_uploaded_bytes() {
        let service = service();
        let created = service
            .create(
                Collection::Documentation,
                Fields::new(),
                Some(&Upload::new("a.gif", vec![4, 2])),
            )
            .unwrap();
        let reference = created.affected_records[0]
            .asset(Collection::Documentation)
            .unwrap()
            .to_string();

        assert_eq!(service.read_asset(&reference).unwrap(), vec![4, 2]);
    }

    #[test]
    fn delete_on_disk_removes_photo_file() {
        let env = crate::test_utils::TestEnv::new();
        let created = env
            .service
            .create(
                Collection::Alumni,
                Fields::new(),
                Some(&Upload::new("foto.jpeg", vec![1, 2])),
            )
            .unwrap();
        assert_eq!(env.upload_names().len(), 1);

        env.service
            .delete(Collection::Alumni, created.affected_records[0].id())
            .unwrap();

        assert!(env.upload_names().is_empty());
    }

    #[test]
    fn policy_limit_applies_to_service_uploads() {
        let service = RecordService::new(
            InMemoryStore::new(),
            AssetPolicy {
                max_bytes: 2,
                ..Default::default()
            },
        );

        let result = service.create(
            Collection::Alumni,
            Fields::new(),
            Some(&Upload::new("a.jpg", vec![1, 2, 3])),
        );

        assert!(matches!(
            result,
            Err(crate::error::BumoError::PayloadTooLarge { size: 3, limit: 2 })
        ));
    }
}
