//! # Data Root Resolution
//!
//! A bumo installation is one directory holding `data.json`, `uploads/` and an
//! optional `bumo.toml`. [`initialize`] finds that directory, loads the
//! configuration, and wires up the [`RecordService`].
//!
//! ## Resolution Order
//!
//! 1. `data_override` (the CLI's `--data-dir`), used as-is.
//! 2. `BUMO_DATA` environment variable.
//! 3. The OS-appropriate data directory via the `directories` crate.
//! 4. `./data` when no home directory can be determined.
//!
//! The directory does not need to exist; the first write creates it and the
//! first read seeds the document.

use crate::api::RecordService;
use crate::config::BumoConfig;
use crate::error::{BumoError, Result};
use crate::store::FileStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DATA_ENV_VAR: &str = "BUMO_DATA";
pub const CONFIG_FILE: &str = "bumo.toml";

pub struct BumoContext {
    pub service: RecordService<crate::store::FsBackend>,
    pub config: BumoConfig,
    pub data_root: PathBuf,
}

pub fn resolve_data_root(data_override: Option<PathBuf>) -> PathBuf {
    if let Some(path) = data_override {
        return path;
    }
    if let Some(path) = std::env::var_os(DATA_ENV_VAR).filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("id", "bumo", "bumo")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Load configuration for `data_root`.
///
/// The user config directory provides defaults; `<data_root>/bumo.toml`
/// overrides them.
pub fn load_config(data_root: &std::path::Path) -> Result<BumoConfig> {
    let mut search_paths = Vec::new();
    if let Some(dirs) = ProjectDirs::from("id", "bumo", "bumo") {
        search_paths.push(SearchPath::Path(dirs.config_dir().to_path_buf()));
    }
    search_paths.push(SearchPath::Path(data_root.to_path_buf()));

    Clapfig::builder()
        .app_name("bumo")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .map_err(|e| BumoError::Config(e.to_string()))
}

/// Resolve the data root, load configuration, and build the service.
pub fn initialize(data_override: Option<PathBuf>) -> Result<BumoContext> {
    let data_root = resolve_data_root(data_override);
    let config = load_config(&data_root)?;
    debug!(data_root = %data_root.display(), ?config, "initialized");

    let service = RecordService::new(FileStore::new_fs(data_root.clone()), config.asset_policy())
        .with_orphan_grace(config.orphan_grace());

    Ok(BumoContext {
        service,
        config,
        data_root,
    })
}
