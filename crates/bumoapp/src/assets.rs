//! # Upload Lifecycle
//!
//! Images attached to documentation, alumni and structure records are stored as
//! separate files and referenced from the record by path. [`AssetManager`]
//! owns those files:
//!
//! - **Store**: validate the upload, write it under a fresh name, hand back
//!   the `/uploads/<name>` reference the record will hold.
//! - **Delete**: remove the file behind a reference. Missing files and
//!   references that do not point into the upload directory are skipped.
//! - **Sweep**: remove files no record references any more (see `doctor`).
//!
//! ## Naming
//!
//! `<unix millis>-<random 0..1e9><original extension>`, e.g.
//! `1711872000000-482915733.jpg`. Names are opaque and unrelated to record ids.
//!
//! ## Validation
//!
//! Checked in this order, before anything touches the disk:
//!
//! 1. Size above the limit (5 MiB by default) → `PayloadTooLarge`
//! 2. Zero bytes → `InvalidAsset`
//! 3. No extension, or an extension outside the allowlist → `InvalidAsset`

use crate::error::{BumoError, Result};
use crate::store::backend::StorageBackend;
use chrono::{Duration, Utc};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const UPLOAD_URL_PREFIX: &str = "/uploads/";

pub fn default_allowed_extensions() -> Vec<String> {
    vec![
        ".jpg".to_string(),
        ".jpeg".to_string(),
        ".png".to_string(),
        ".gif".to_string(),
        ".webp".to_string(),
    ]
}

/// An uploaded file as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read a local file as an upload, keeping its file name.
    ///
    /// Files larger than `max_bytes` are rejected from their metadata, before
    /// any of their contents are read.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self> {
        let size = fs::metadata(path)
            .map_err(BumoError::StorageUnavailable)?
            .len();
        if size > max_bytes {
            return Err(BumoError::PayloadTooLarge {
                size,
                limit: max_bytes,
            });
        }
        let bytes = fs::read(path).map_err(BumoError::StorageUnavailable)?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self { filename, bytes })
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The original extension including the dot, as given (`.JPG` stays `.JPG`).
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPolicy {
    pub max_bytes: u64,
    /// Lowercase, dot-prefixed. Empty means any extension is accepted.
    pub allowed_extensions: Vec<String>,
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl AssetPolicy {
    fn allows(&self, extension: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        let extension = extension.to_ascii_lowercase();
        self.allowed_extensions
            .iter()
            .any(|allowed| normalize_extension(allowed) == extension)
    }
}

/// `"JPG"` and `".jpg"` both become `".jpg"`.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Map a record's reference to a file name inside the upload directory.
///
/// Accepts `/uploads/<name>` and `uploads/<name>`. Anything else, including
/// names with path separators or a leading dot, is not ours and yields `None`.
pub fn resolve_reference(reference: &str) -> Option<&str> {
    let name = reference
        .strip_prefix(UPLOAD_URL_PREFIX)
        .or_else(|| reference.strip_prefix(&UPLOAD_URL_PREFIX[1..]))?;
    let is_plain = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(|c: char| c == '/' || c == '\\');
    is_plain.then_some(name)
}

fn generate_name(extension: &str) -> String {
    let suffix = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, extension)
}

/// Borrowed view over a backend's upload directory.
pub struct AssetManager<'a, B: StorageBackend> {
    backend: &'a B,
    policy: &'a AssetPolicy,
}

impl<'a, B: StorageBackend> AssetManager<'a, B> {
    pub fn new(backend: &'a B, policy: &'a AssetPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &AssetPolicy {
        self.policy
    }

    /// Check an upload against the policy without writing anything.
    pub fn validate(&self, upload: &Upload) -> Result<String> {
        if upload.len() > self.policy.max_bytes {
            return Err(BumoError::PayloadTooLarge {
                size: upload.len(),
                limit: self.policy.max_bytes,
            });
        }
        if upload.is_empty() {
            return Err(BumoError::InvalidAsset(format!(
                "{} is empty",
                upload.filename
            )));
        }
        let extension = upload.extension().ok_or_else(|| {
            BumoError::InvalidAsset(format!("{} has no file extension", upload.filename))
        })?;
        if !self.policy.allows(&extension) {
            return Err(BumoError::InvalidAsset(format!(
                "{} files are not accepted",
                extension
            )));
        }
        Ok(extension)
    }

    /// Validate and write an upload, returning its reference.
    pub fn store(&self, upload: &Upload) -> Result<String> {
        let extension = self.validate(upload)?;
        let name = generate_name(&extension);
        self.backend.write_asset(&name, &upload.bytes)?;
        debug!(name = %name, size = upload.len(), original = %upload.filename, "asset stored");
        Ok(format!("{}{}", UPLOAD_URL_PREFIX, name))
    }

    pub fn read(&self, reference: &str) -> Result<Vec<u8>> {
        let name = resolve_reference(reference).ok_or_else(|| {
            BumoError::InvalidAsset(format!("{} is not an upload reference", reference))
        })?;
        self.backend
            .read_asset(name)?
            .ok_or_else(|| BumoError::InvalidAsset(format!("no such upload: {}", reference)))
    }

    pub fn exists(&self, reference: &str) -> Result<bool> {
        match resolve_reference(reference) {
            Some(name) => self.backend.asset_exists(name),
            None => Ok(false),
        }
    }

    /// Remove the file behind `reference`. Idempotent.
    pub fn delete(&self, reference: &str) -> Result<()> {
        if reference.is_empty() {
            return Ok(());
        }
        let Some(name) = resolve_reference(reference) else {
            warn!(reference = %reference, "not an upload reference, skipping delete");
            return Ok(());
        };
        if self.backend.delete_asset(name)? {
            debug!(name = %name, "asset deleted");
        }
        Ok(())
    }

    /// Delete every file not in `referenced` and older than `grace`.
    ///
    /// The grace period protects uploads written by a create or update that
    /// has not persisted its record yet. Returns how many files were removed.
    pub fn sweep(&self, referenced: &BTreeSet<String>, grace: Duration) -> Result<usize> {
        let keep: BTreeSet<&str> = referenced
            .iter()
            .filter_map(|reference| resolve_reference(reference))
            .collect();
        let cutoff = Utc::now() - grace;

        let mut removed = 0;
        for entry in self.backend.list_assets()? {
            if keep.contains(entry.name.as_str()) || entry.modified > cutoff {
                continue;
            }
            if self.backend.delete_asset(&entry.name)? {
                info!(name = %entry.name, "removed orphaned upload");
                removed += 1;
            }
        }
        Ok(removed)
    }
}
