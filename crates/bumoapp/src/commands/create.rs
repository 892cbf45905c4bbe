use crate::assets::{AssetManager, Upload};
use crate::commands::helpers::{discard_upload, store_upload, strip_asset_field};
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
    mut fields: Fields,
    upload: Option<&Upload>,
) -> Result<CmdResult> {
    strip_asset_field(collection, &mut fields);
    let reference = store_upload(assets, collection, upload)?;

    if let Some(field) = collection.asset_field() {
        fields.insert(
            field.to_string(),
            Value::String(reference.clone().unwrap_or_default()),
        );
    }

    let record = match CollectionRepository::new(store, collection).create(fields) {
        Ok(record) => record,
        Err(e) => {
            discard_upload(assets, reference.as_deref());
            return Err(e);
        }
    };
    info!(collection = %collection, id = %record.id(), "record created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} created: {}",
        collection.label(),
        record.id()
    )));
    Ok(result.with_affected_records(vec![record]))
}
