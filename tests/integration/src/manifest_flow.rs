//! End-to-end manifest update flow
//!
//! Exercises the complete library path: scan -> read -> diff -> serialize,
//! against real folders on disk.

use std::fs;
use std::path::Path;

use curator_manifest::{
    ImportOptions, MANIFEST_FILE_NAME, Manifest, PersistAction, UpdateOptions, copy_into,
    update_folder,
};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn manifest_bytes(dir: &Path) -> Vec<u8> {
    fs::read(dir.join(MANIFEST_FILE_NAME)).unwrap()
}

#[test]
fn update_cycle_is_idempotent_and_byte_stable() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "item10.json", r#"{"version": 1, "format": "x"}"#);
    write_file(temp.path(), "item2.json", r#"{"version": 1, "format": "x"}"#);
    write_file(temp.path(), "item1.json", r#"{"version": 1, "format": "x"}"#);
    write_file(temp.path(), "art.png", "not really a png");

    let first = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert_eq!(first.diff.added.len(), 4);
    let bytes = manifest_bytes(temp.path());

    // Natural order in the serialized output
    let text = String::from_utf8(bytes.clone()).unwrap();
    let pos = |n: &str| text.find(n).unwrap();
    assert!(pos("item1.json") < pos("item2.json"));
    assert!(pos("item2.json") < pos("item10.json"));

    let second = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert!(second.diff.is_empty());
    assert_eq!(second.action, PersistAction::Unchanged);
    assert_eq!(manifest_bytes(temp.path()), bytes);
}

#[test]
fn full_lifecycle_add_update_remove_delete() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", r#"{"version": 1, "format": "x"}"#);
    update_folder(temp.path(), &UpdateOptions::default()).unwrap();

    // Add
    write_file(temp.path(), "b.json", r#"{"version": 1, "format": "x"}"#);
    let report = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert_eq!(report.diff.added.len(), 1);
    assert_eq!(report.diff.added[0].filename, "b.json");

    // Update
    write_file(temp.path(), "a.json", r#"{"version": 2, "format": "x"}"#);
    let report = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert_eq!(report.diff.updated.len(), 1);
    assert_eq!(report.diff.updated[0].filename, "a.json");

    // Remove one
    fs::remove_file(temp.path().join("b.json")).unwrap();
    let report = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert_eq!(report.diff.removed.len(), 1);

    // Remove all: manifest is deleted, never written as {}
    fs::remove_file(temp.path().join("a.json")).unwrap();
    let report = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert_eq!(report.action, PersistAction::Deleted);
    assert!(!temp.path().join(MANIFEST_FILE_NAME).exists());
}

#[test]
fn parse_render_round_trip_preserves_bytes() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "a.json",
        r#"{"version": 1, "mod": {"id": "m1", "author": "someone"}, "metadata": {"tag": "x"}}"#,
    );
    write_file(temp.path(), "img.png", "bytes");
    update_folder(temp.path(), &UpdateOptions::default()).unwrap();

    let bytes = manifest_bytes(temp.path());
    let manifest = Manifest::load(&temp.path().join(MANIFEST_FILE_NAME)).unwrap();
    let rendered = curator_manifest::writer::render(&manifest).unwrap();
    assert_eq!(rendered.as_bytes(), bytes.as_slice());
}

#[test]
fn dry_run_leaves_folder_byte_for_byte_unchanged() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", r#"{"version": 1}"#);
    update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    let before = manifest_bytes(temp.path());

    write_file(temp.path(), "b.json", r#"{"version": 1}"#);
    let report = update_folder(temp.path(), &UpdateOptions::new(true, false)).unwrap();

    assert_eq!(report.diff.added.len(), 1);
    assert_eq!(manifest_bytes(temp.path()), before);
}

#[test]
fn import_then_update_round_trip() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write_file(src.path(), "one.json", r#"{"version": 1, "name": "One"}"#);
    write_file(src.path(), "two.jpg", "jpeg bytes");

    let report = copy_into(
        &[src.path().to_path_buf()],
        dest.path(),
        &ImportOptions::default(),
    )
    .unwrap();

    assert_eq!(report.copied.len(), 2);
    assert_eq!(report.update.diff.added.len(), 2);

    let manifest = Manifest::load(&dest.path().join(MANIFEST_FILE_NAME)).unwrap();
    let entry = manifest.get("one.json").unwrap();
    assert_eq!(entry.version.as_deref(), Some("1"));
    assert_eq!(entry.metadata.as_ref().unwrap()["name"], "One");
    assert!(manifest.get("two.jpg").unwrap().fingerprint.is_some());
}

#[test]
fn malformed_manifest_recovers_and_regenerates() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", r#"{"version": 1}"#);
    write_file(temp.path(), MANIFEST_FILE_NAME, "not json at all");

    let report = update_folder(temp.path(), &UpdateOptions::default()).unwrap();
    assert_eq!(report.diff.added.len(), 1);
    assert!(report.warnings.iter().any(|w| w.contains("malformed")));

    let value: serde_json::Value =
        serde_json::from_slice(&manifest_bytes(temp.path())).unwrap();
    assert!(value.get("a.json").is_some());
}
