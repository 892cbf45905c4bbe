use crate::assets::AssetManager;
use crate::commands::helpers::release_upload;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Collection;
use crate::store::backend::StorageBackend;
use crate::store::{CollectionRepository, DocumentStore};
use tracing::info;

pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    assets: &AssetManager<'_, B>,
    collection: Collection,
    id: &str,
) -> Result<CmdResult> {
    let removed = CollectionRepository::new(store, collection).delete(id)?;
    let mut result = CmdResult::default();

    let Some(record) = removed else {
        result.add_message(CmdMessage::info(format!(
            "{} {} was already gone",
            collection.label(),
            id
        )));
        return Ok(result);
    };
    info!(collection = %collection, id = %id, "record deleted");

    result.add_message(CmdMessage::success(format!(
        "{} deleted successfully",
        collection.label()
    )));
    if let Some(reference) = record.asset(collection) {
        if let Some(warning) = release_upload(assets, reference) {
            result.add_message(CmdMessage::warning(warning));
        }
    }

    Ok(result.with_affected_records(vec![record]))
}
