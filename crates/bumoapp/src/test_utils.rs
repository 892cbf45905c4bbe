use crate::api::RecordService;
use crate::assets::AssetPolicy;
use crate::store::{FileStore, FsBackend};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub service: RecordService<FsBackend>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_policy(AssetPolicy::default())
    }

    pub fn with_policy(policy: AssetPolicy) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let service = RecordService::new(FileStore::new_fs(root.clone()), policy);
        Self {
            _temp_dir: temp_dir,
            service,
            root,
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.root.join(crate::store::fs_backend::UPLOAD_DIR)
    }

    pub fn upload_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|name| !name.starts_with('.'))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
