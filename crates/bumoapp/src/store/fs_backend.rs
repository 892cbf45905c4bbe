use super::backend::{AssetEntry, StorageBackend};
use crate::error::{BumoError, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use uuid::Uuid;

pub const DOCUMENT_FILE: &str = "data.json";
pub const UPLOAD_DIR: &str = "uploads";

pub struct FsBackend {
    root: PathBuf,
    upload_dir: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        let upload_dir = root.join(UPLOAD_DIR);
        Self { root, upload_dir }
    }

    /// Keep uploads somewhere other than `<root>/uploads`.
    pub fn with_upload_dir(mut self, dir: PathBuf) -> Self {
        self.upload_dir = dir;
        self
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(DOCUMENT_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(BumoError::StorageUnavailable)?;
        }
        Ok(())
    }

    /// Write `bytes` to a temp file in `dir`, fsync it, then rename over `target`.
    /// The temp file is removed if any step fails.
    fn write_atomic(&self, dir: &Path, target: &Path, prefix: &str, bytes: &[u8]) -> Result<()> {
        self.ensure_dir(dir)?;

        let tmp_path = dir.join(format!(".{}-{}.tmp", prefix, Uuid::new_v4()));
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        let outcome = written.and_then(|_| fs::rename(&tmp_path, target));

        if let Err(e) = outcome {
            let _ = fs::remove_file(&tmp_path);
            return Err(BumoError::StorageUnavailable(e));
        }
        debug!(path = %target.display(), size = bytes.len(), "atomic write");
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_document(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.document_path()) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BumoError::StorageUnavailable(e)),
        }
    }

    fn write_document(&self, content: &str) -> Result<()> {
        self.write_atomic(
            &self.root,
            &self.document_path(),
            "data",
            content.as_bytes(),
        )
    }

    fn write_asset(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let target = self.upload_dir.join(name);
        self.write_atomic(&self.upload_dir, &target, "upload", bytes)
    }

    fn read_asset(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.upload_dir.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BumoError::StorageUnavailable(e)),
        }
    }

    fn asset_exists(&self, name: &str) -> Result<bool> {
        match fs::metadata(self.upload_dir.join(name)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BumoError::StorageUnavailable(e)),
        }
    }

    fn delete_asset(&self, name: &str) -> Result<bool> {
        match fs::remove_file(self.upload_dir.join(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BumoError::StorageUnavailable(e)),
        }
    }

    fn list_assets(&self) -> Result<Vec<AssetEntry>> {
        if !self.upload_dir.exists() {
            return Ok(Vec::new());
        }

        let mut assets = Vec::new();
        let entries = fs::read_dir(&self.upload_dir).map_err(BumoError::StorageUnavailable)?;

        for entry in entries {
            let entry = entry.map_err(BumoError::StorageUnavailable)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                let meta = entry.metadata().map_err(BumoError::StorageUnavailable)?;
                let modified: DateTime<Utc> =
                    meta.modified().unwrap_or(SystemTime::now()).into();
                assets.push(AssetEntry {
                    name: name.to_string(),
                    modified,
                });
            }
        }
        Ok(assets)
    }
}
