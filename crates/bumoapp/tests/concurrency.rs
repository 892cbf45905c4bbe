use bumoapp::api::RecordService;
use bumoapp::assets::{AssetPolicy, Upload};
use bumoapp::model::{Collection, Fields};
use bumoapp::store::FileStore;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 10;

#[test]
fn concurrent_creates_are_all_persisted() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(RecordService::new(
        FileStore::new_fs(dir.path().to_path_buf()),
        AssetPolicy::default(),
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let mut fields = Fields::new();
                    fields.insert("title".into(), json!(format!("t{}-{}", t, i)));
                    service.create(Collection::Articles, fields, None).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Reload through a fresh store so nothing is served from memory.
    let reopened = RecordService::new(
        FileStore::new_fs(dir.path().to_path_buf()),
        AssetPolicy::default(),
    );
    let articles = reopened.list(Collection::Articles).unwrap().listed_records;
    assert_eq!(articles.len(), 1 + THREADS * PER_THREAD);

    let ids: BTreeSet<&str> = articles.iter().map(|r| r.id()).collect();
    assert_eq!(ids.len(), articles.len(), "ids must be unique");
}

#[test]
fn concurrent_updates_to_different_collections_do_not_clobber() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(RecordService::new(
        FileStore::new_fs(dir.path().to_path_buf()),
        AssetPolicy::default(),
    ));

    let writers: Vec<_> = [Collection::Reports, Collection::Alumni]
        .into_iter()
        .map(|collection| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let upload = collection
                        .has_assets()
                        .then(|| Upload::new("p.jpg", vec![i as u8 + 1]));
                    service
                        .create(collection, Fields::new(), upload.as_ref())
                        .unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(
        service.list(Collection::Reports).unwrap().listed_records.len(),
        1 + PER_THREAD
    );
    assert_eq!(
        service.list(Collection::Alumni).unwrap().listed_records.len(),
        1 + PER_THREAD
    );
}
