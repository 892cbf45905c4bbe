//! # Configuration
//!
//! Bumo configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `BUMO__MAX_UPLOAD_BYTES`, `BUMO__ORPHAN_GRACE_SECS`, etc.
//! 2. **Data root config**: `<data root>/bumo.toml`.
//! 3. **User config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_upload_bytes` | `5242880` | Largest accepted upload (5 MiB) |
//! | `allowed_extensions` | `[".jpg", ".jpeg", ".png", ".gif", ".webp"]` | Upload extensions; `[]` accepts anything |
//! | `orphan_grace_secs` | `300` | Minimum age before `doctor` removes an unreferenced upload |

use crate::assets::{default_allowed_extensions, normalize_extension, AssetPolicy, DEFAULT_MAX_UPLOAD_BYTES};
use confique::Config;
use serde::{Deserialize, Serialize};

const DEFAULT_ORPHAN_GRACE_SECS: u64 = 300;

/// Configuration for bumo, stored in `bumo.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BumoConfig {
    /// Largest accepted upload, in bytes.
    #[config(default = 5242880)]
    pub max_upload_bytes: u64,

    /// Extensions accepted for uploads (e.g. ".jpg", "png").
    /// When absent, defaults to common image types. An empty list accepts anything.
    pub allowed_extensions: Option<Vec<String>>,

    /// Seconds an unreferenced upload must age before `doctor` removes it.
    #[config(default = 300)]
    pub orphan_grace_secs: u64,
}

impl Default for BumoConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: None,
            orphan_grace_secs: DEFAULT_ORPHAN_GRACE_SECS,
        }
    }
}

impl BumoConfig {
    /// Allowed extensions, normalized to lowercase with a leading dot.
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .as_ref()
            .map(|exts| exts.iter().map(|ext| normalize_extension(ext)).collect())
            .unwrap_or_else(default_allowed_extensions)
    }

    pub fn asset_policy(&self) -> AssetPolicy {
        AssetPolicy {
            max_bytes: self.max_upload_bytes,
            allowed_extensions: self.allowed_extensions(),
        }
    }

    pub fn orphan_grace(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.orphan_grace_secs).unwrap_or(i64::MAX))
    }
}
