use crate::assets::{AssetManager, Upload};
use crate::commands::helpers::{discard_upload, release_upload, store_upload, strip_asset_field};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Collection, Fields};
use crate::store::backend::StorageBackend;
use crate::store::{CollectionRepository, DocumentStore};
use serde_json::Value;
use tracing::info;

pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    assets: &AssetManager<'_, B>,
    collection: Collection,
    id: &str,
    mut fields: Fields,
    upload: Option<&Upload>,
) -> Result<CmdResult> {
    strip_asset_field(collection, &mut fields);
    let reference = store_upload(assets, collection, upload)?;

    let repo = CollectionRepository::new(store, collection);
    let outcome = repo.update_with(id, |record| {
        record.merge(fields);
        match (collection.asset_field(), &reference) {
            (Some(field), Some(new)) => record.set(field, Value::String(new.clone())),
            _ => None,
        }
    });

    let (record, previous) = match outcome {
        Ok(updated) => updated,
        Err(e) => {
            discard_upload(assets, reference.as_deref());
            return Err(e);
        }
    };
    info!(collection = %collection, id = %record.id(), "record updated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} updated: {}",
        collection.label(),
        record.id()
    )));

    let replaced = previous
        .as_ref()
        .and_then(Value::as_str)
        .filter(|old| !old.is_empty() && Some(*old) != reference.as_deref());
    if let Some(old) = replaced {
        if let Some(warning) = release_upload(assets, old) {
            result.add_message(CmdMessage::warning(warning));
        }
    }

    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetPolicy;
    use crate::commands::create;
    use crate::error::BumoError;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn create_member<B: StorageBackend>(
        store: &DocumentStore<B>,
        assets: &AssetManager<'_, B>,
        photo: &Upload,
    ) -> (String, String) {
        let result = create::run(
            store,
            assets,
            Collection::Structure,
            fields(json!({"nama": "Siti", "jabatan": "Ketua"})),
            Some(photo),
        )
        .unwrap();
        let record = &result.affected_records[0];
        (
            record.id().to_string(),
            record.asset(Collection::Structure).unwrap().to_string(),
        )
    }

    #[test]
    fn merges_fields_and_keeps_the_rest() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);

        let result = run(
            &store,
            &assets,
            Collection::Reports,
            "1",
            fields(json!({"saldo": 7000000})),
            None,
        )
        .unwrap();

        let record = &result.affected_records[0];
        assert_eq!(record.get("saldo"), Some(&json!(7000000)));
        assert_eq!(record.get("periode"), Some(&json!("Q1 2024")));
    }

    #[test]
    fn replacing_photo_deletes_the_old_file() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);
        let (id, photo_a) = create_member(&store, &assets, &Upload::new("a.jpg", vec![1]));

        let result = run(
            &store,
            &assets,
            Collection::Structure,
            &id,
            Fields::new(),
            Some(&Upload::new("b.jpg", vec![2])),
        )
        .unwrap();

        let photo_b = result.affected_records[0]
            .asset(Collection::Structure)
            .unwrap()
            .to_string();
        assert_ne!(photo_a, photo_b);
        assert!(!assets.exists(&photo_a).unwrap());
        assert_eq!(assets.read(&photo_b).unwrap(), vec![2]);
        assert_eq!(store.backend().asset_names().len(), 1);
    }

    #[test]
    fn update_without_upload_keeps_photo() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);
        let (id, photo) = create_member(&store, &assets, &Upload::new("a.jpg", vec![1]));

        let result = run(
            &store,
            &assets,
            Collection::Structure,
            &id,
            fields(json!({"jabatan": "Wakil", "photo": ""})),
            None,
        )
        .unwrap();

        let record = &result.affected_records[0];
        assert_eq!(record.get("jabatan"), Some(&json!("Wakil")));
        assert_eq!(record.asset(Collection::Structure), Some(photo.as_str()));
        assert!(assets.exists(&photo).unwrap());
    }

    #[test]
    fn missing_record_discards_the_new_upload() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);

        let result = run(
            &store,
            &assets,
            Collection::Alumni,
            "nope",
            Fields::new(),
            Some(&Upload::new("x.jpg", vec![1])),
        );

        assert!(matches!(result, Err(BumoError::NotFound { .. })));
        assert!(store.backend().asset_names().is_empty());
    }

    #[test]
    fn failed_persist_keeps_old_photo_and_drops_new() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);
        let (id, photo_a) = create_member(&store, &assets, &Upload::new("a.jpg", vec![1]));
        store.backend().set_fail_document_writes(true);

        let result = run(
            &store,
            &assets,
            Collection::Structure,
            &id,
            Fields::new(),
            Some(&Upload::new("b.jpg", vec![2])),
        );

        assert!(matches!(result, Err(BumoError::StorageUnavailable(_))));
        let names = store.backend().asset_names();
        assert_eq!(names.len(), 1);
        assert!(assets.exists(&photo_a).unwrap());
    }

    #[test]
    fn invalid_replacement_leaves_everything_alone() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);
        let (id, photo_a) = create_member(&store, &assets, &Upload::new("a.jpg", vec![1]));
        let before = store.backend().raw_document();

        let result = run(
            &store,
            &assets,
            Collection::Structure,
            &id,
            fields(json!({"nama": "Changed"})),
            Some(&Upload::new("b.jpg", Vec::new())),
        );

        assert!(matches!(result, Err(BumoError::InvalidAsset(_))));
        assert_eq!(store.backend().raw_document(), before);
        assert!(assets.exists(&photo_a).unwrap());
    }

    #[test]
    fn failed_replacement_write_keeps_record_and_old_photo() {
        let store = InMemoryStore::new();
        let policy = AssetPolicy::default();
        let assets = AssetManager::new(store.backend(), &policy);
        let (id, photo_a) = create_member(&store, &assets, &Upload::new("a.jpg", vec![1]));
        let before = store.backend().raw_document();
        store.backend().set_fail_asset_writes(true);

        let result = run(
            &store,
            &assets,
            Collection::Structure,
            &id,
            fields(json!({"jabatan": "Wakil"})),
            Some(&Upload::new("b.jpg", vec![2])),
        );

        assert!(matches!(result, Err(BumoError::StorageUnavailable(_))));
        assert_eq!(store.backend().raw_document(), before);
        assert_eq!(store.backend().asset_names().len(), 1);
        assert!(assets.exists(&photo_a).unwrap());
        let record = crate::store::CollectionRepository::new(&store, Collection::Structure)
            .get(&id)
            .unwrap();
        assert_eq!(record.get("jabatan"), Some(&json!("Ketua")));
        assert_eq!(record.asset(Collection::Structure), Some(photo_a.as_str()));
    }
}
