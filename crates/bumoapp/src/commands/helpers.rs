use crate::assets::{AssetManager, Upload};
use crate::error::{BumoError, Result};
use crate::model::{Collection, Fields};
use crate::store::backend::StorageBackend;
use tracing::warn;

/// Drop any caller-supplied value for the collection's asset field.
/// Only the asset manager writes that field.
pub fn strip_asset_field(collection: Collection, fields: &mut Fields) {
    if let Some(field) = collection.asset_field() {
        fields.remove(field);
    }
}

/// Validate and store `upload` for `collection`, returning its reference.
///
/// Collections without an asset field refuse uploads outright.
pub fn store_upload<B: StorageBackend>(
    assets: &AssetManager<'_, B>,
    collection: Collection,
    upload: Option<&Upload>,
) -> Result<Option<String>> {
    let Some(upload) = upload else {
        return Ok(None);
    };
    if !collection.has_assets() {
        return Err(BumoError::InvalidAsset(format!(
            "{} do not take uploads",
            collection
        )));
    }
    assets.store(upload).map(Some)
}

/// Remove an upload whose record could not be persisted.
pub fn discard_upload<B: StorageBackend>(assets: &AssetManager<'_, B>, reference: Option<&str>) {
    if let Some(reference) = reference {
        if let Err(e) = assets.delete(reference) {
            warn!(reference = %reference, error = %e, "could not remove unpersisted upload");
        }
    }
}

/// Delete a no-longer-referenced upload after its record change was persisted.
///
/// The record change already succeeded, so a failure here is reported as a
/// warning rather than an error; `doctor` removes the file later.
pub fn release_upload<B: StorageBackend>(
    assets: &AssetManager<'_, B>,
    reference: &str,
) -> Option<String> {
    match assets.delete(reference) {
        Ok(()) => None,
        Err(e) => {
            warn!(reference = %reference, error = %e, "could not remove replaced upload");
            Some(format!("Could not remove {}: {}", reference, e))
        }
    }
}
