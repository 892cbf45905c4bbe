use crate::assets::AssetManager;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::DocumentStore;
use chrono::Duration;

/// Report from the `doctor` operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub removed_orphans: usize,
    pub missing_assets: Vec<String>,
}

/// Sweep unreferenced uploads and look for references to missing files.
///
/// Runs under the document lock so no record can start or stop referencing a
/// file mid-sweep. Uploads younger than `grace` are left alone: they may
/// belong to a create or update that has not persisted yet.
pub fn check<B: StorageBackend>(
    store: &DocumentStore<B>,
    assets: &AssetManager<'_, B>,
    grace: Duration,
) -> Result<DoctorReport> {
    store.inspect(|document| {
        let referenced = document.asset_references();
        let removed_orphans = assets.sweep(&referenced, grace)?;

        let mut missing_assets = Vec::new();
        for reference in &referenced {
            if !assets.exists(reference)? {
                missing_assets.push(reference.clone());
            }
        }

        Ok(DoctorReport {
            removed_orphans,
            missing_assets,
        })
    })
}

pub fn run<B: StorageBackend>(
    store: &DocumentStore<B>,
    assets: &AssetManager<'_, B>,
    grace: Duration,
) -> Result<CmdResult> {
    let report = check(store, assets, grace)?;
    let mut result = CmdResult::default();

    if report.removed_orphans == 0 && report.missing_assets.is_empty() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning("Inconsistencies found:"));
    if report.removed_orphans > 0 {
        result.add_message(CmdMessage::success(format!(
            "  - Removed {} upload(s) no record referenced.",
            report.removed_orphans
        )));
    }
    for reference in &report.missing_assets {
        result.add_message(CmdMessage::info(format!(
            "  - {} is referenced but missing from disk.",
            reference
        )));
    }

    Ok(result)
}
