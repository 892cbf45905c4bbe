use bumoapp::api::RecordService;
use bumoapp::assets::{AssetPolicy, Upload};
use bumoapp::error::BumoError;
use bumoapp::model::{Collection, Fields};
use bumoapp::store::fs_backend::{DOCUMENT_FILE, UPLOAD_DIR};
use bumoapp::store::{FileStore, FsBackend};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, RecordService<FsBackend>) {
    let dir = TempDir::new().unwrap();
    let service = RecordService::new(
        FileStore::new_fs(dir.path().to_path_buf()),
        AssetPolicy::default(),
    );
    (dir, service)
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn upload_files(dir: &TempDir) -> Vec<String> {
    fs::read_dir(dir.path().join(UPLOAD_DIR))
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

fn on_disk(dir: &TempDir) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.path().join(DOCUMENT_FILE)).unwrap()).unwrap()
}

#[test]
fn first_list_seeds_the_document() {
    let (dir, service) = setup();

    let result = service.list(Collection::Reports).unwrap();

    assert_eq!(result.listed_records.len(), 1);
    assert_eq!(result.listed_records[0].id(), "1");
    let document = on_disk(&dir);
    assert_eq!(document["structure"].as_array().unwrap().len(), 4);
    assert_eq!(document["documentation"][0]["image"], "/uploads/sample-doc.jpg");
}

#[test]
fn report_lifecycle() {
    let (dir, service) = setup();

    let created = service
        .create(
            Collection::Reports,
            fields(json!({"title": "Q1", "amount": 100})),
            None,
        )
        .unwrap();
    let id = created.affected_records[0].id().to_string();

    let listed = service.list(Collection::Reports).unwrap().listed_records;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].get("title"), Some(&json!("Q1")));
    assert!(listed[1].created_at().is_some());

    service
        .update(Collection::Reports, &id, fields(json!({"amount": 150})), None)
        .unwrap();
    let updated = service.get(Collection::Reports, &id).unwrap();
    assert_eq!(updated.get("title"), Some(&json!("Q1")));
    assert_eq!(updated.get("amount"), Some(&json!(150)));

    let deleted = service.delete(Collection::Reports, &id).unwrap();
    assert!(deleted.messages[0].content.contains("deleted successfully"));
    assert!(matches!(
        service.get(Collection::Reports, &id),
        Err(BumoError::NotFound { .. })
    ));

    let document = on_disk(&dir);
    assert_eq!(document["reports"].as_array().unwrap().len(), 1);
}

#[test]
fn oversized_alumni_photo_changes_nothing() {
    let (dir, service) = setup();
    let before = fs::read_to_string(dir.path().join(DOCUMENT_FILE)).ok();

    let result = service.create(
        Collection::Alumni,
        fields(json!({"name": "Sari"})),
        Some(&Upload::new("sari.jpg", vec![0u8; 6 * 1024 * 1024])),
    );

    assert!(matches!(result, Err(BumoError::PayloadTooLarge { .. })));
    assert!(upload_files(&dir).is_empty());
    assert_eq!(fs::read_to_string(dir.path().join(DOCUMENT_FILE)).ok(), before);
    assert_eq!(service.list(Collection::Alumni).unwrap().listed_records.len(), 1);
}

#[test]
fn structure_photo_replacement_keeps_one_file() {
    let (dir, service) = setup();

    let created = service
        .create(
            Collection::Structure,
            fields(json!({"name": "Budi", "position": "Ketua"})),
            Some(&Upload::new("a.jpg", vec![1, 1, 1])),
        )
        .unwrap();
    let record = &created.affected_records[0];
    let id = record.id().to_string();
    let photo_a = record.asset(Collection::Structure).unwrap().to_string();
    assert_eq!(upload_files(&dir).len(), 1);

    let updated = service
        .update(
            Collection::Structure,
            &id,
            Fields::new(),
            Some(&Upload::new("b.png", vec![2, 2])),
        )
        .unwrap();
    let photo_b = updated.affected_records[0]
        .asset(Collection::Structure)
        .unwrap()
        .to_string();

    assert_ne!(photo_a, photo_b);
    let files = upload_files(&dir);
    assert_eq!(files.len(), 1);
    assert!(photo_b.ends_with(&files[0]));
    assert_eq!(service.read_asset(&photo_b).unwrap(), vec![2, 2]);
    assert_eq!(
        service.get(Collection::Structure, &id).unwrap().get("position"),
        Some(&json!("Ketua"))
    );

    service.delete(Collection::Structure, &id).unwrap();
    assert!(upload_files(&dir).is_empty());
}

#[test]
fn uploads_rejected_for_text_collections() {
    let (dir, service) = setup();

    let result = service.create(
        Collection::Articles,
        fields(json!({"title": "Kabar"})),
        Some(&Upload::new("a.jpg", vec![1])),
    );

    assert!(matches!(result, Err(BumoError::InvalidAsset(_))));
    assert!(upload_files(&dir).is_empty());
}

#[test]
fn corrupt_document_is_reported_not_reset() {
    let (dir, service) = setup();
    fs::write(dir.path().join(DOCUMENT_FILE), "{ not json").unwrap();

    let result = service.list(Collection::Articles);

    assert!(matches!(result, Err(BumoError::CorruptDocument(_))));
    assert_eq!(
        fs::read_to_string(dir.path().join(DOCUMENT_FILE)).unwrap(),
        "{ not json"
    );
}

#[test]
fn doctor_reports_missing_seed_image() {
    let (_dir, service) = setup();

    let result = service.doctor().unwrap();

    assert!(result
        .messages
        .iter()
        .any(|m| m.content.contains("/uploads/sample-doc.jpg")));
}
