//! Type-specific metadata readers
//!
//! A registry maps file extensions to reader capabilities. Each reader turns
//! a scanned file into a manifest entry, or skips it with a reason; per-file
//! problems never abort a whole scan.

use serde_json::{Map, Value};

use curator_fs::{FileRecord, content_fingerprint, file_fingerprint};

use crate::entry::{EntryKind, ManifestEntry};
use crate::Result;

/// Top-level string fields copied into an entry's `metadata` map when the
/// source document does not already provide them there.
const DESCRIPTIVE_FIELDS: [&str; 2] = ["name", "description"];

/// Outcome of reading one candidate file.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Entry(ManifestEntry),
    Skip { reason: String },
}

/// A reader capability: one function per supported file type.
pub type MetadataReader = fn(&FileRecord) -> Result<ReadOutcome>;

/// Look up the reader registered for an extension.
///
/// Adding a new file type means registering one more function here; there is
/// no base type to extend.
pub fn reader_for(extension: &str) -> Option<MetadataReader> {
    match extension {
        "json" | "jsonc" => Some(read_json),
        "png" | "jpg" | "jpeg" => Some(read_binary),
        _ => None,
    }
}

/// Read a JSON document and lift its descriptive fields into an entry.
///
/// Unparseable or non-object documents are skipped with a reason. A valid
/// but empty object still yields a minimal entry so its presence is tracked.
pub fn read_json(record: &FileRecord) -> Result<ReadOutcome> {
    let text = curator_fs::read_text(&record.path)?;

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(file = %record.file_name, error = %e, "failed to parse JSON");
            return Ok(ReadOutcome::Skip {
                reason: format!("invalid JSON: {e}"),
            });
        }
    };

    let Value::Object(doc) = value else {
        tracing::warn!(file = %record.file_name, "top-level JSON value is not an object");
        return Ok(ReadOutcome::Skip {
            reason: "top-level JSON value is not an object".to_string(),
        });
    };

    let mut metadata = object_field(&doc, "metadata").unwrap_or_default();
    for key in DESCRIPTIVE_FIELDS {
        if metadata.contains_key(key) {
            continue;
        }
        if let Some(text) = doc.get(key).and_then(Value::as_str) {
            metadata.insert(key.to_string(), Value::String(text.to_string()));
        }
    }

    let entry = ManifestEntry {
        filename: record.file_name.clone(),
        kind: EntryKind::Json,
        version: scalar_field(&doc, "version"),
        format: scalar_field(&doc, "format"),
        mod_info: object_field(&doc, "mod"),
        metadata: (!metadata.is_empty()).then_some(metadata),
        fingerprint: Some(semantic_fingerprint(&doc)),
    };

    Ok(ReadOutcome::Entry(entry))
}

/// Read a binary file (e.g. an image): content fingerprint only, no
/// semantic fields.
pub fn read_binary(record: &FileRecord) -> Result<ReadOutcome> {
    let mut entry = ManifestEntry::minimal(record.file_name.clone(), EntryKind::Binary);
    entry.fingerprint = Some(file_fingerprint(&record.path)?);
    Ok(ReadOutcome::Entry(entry))
}

/// Fallback used in allow-all mode when no reader matches the extension.
/// Identical in shape to the binary reader's output.
pub fn read_generic(record: &FileRecord) -> Result<ReadOutcome> {
    read_binary(record)
}

/// Fingerprint of a JSON document with the top-level `version` key removed,
/// over a canonical sorted-key compact rendering. Version-only bumps keep
/// the fingerprint stable; the `version` field itself still diffs.
fn semantic_fingerprint(doc: &Map<String, Value>) -> String {
    let filtered: Map<String, Value> = doc
        .iter()
        .filter(|(key, _)| key.as_str() != "version")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let normalized = serde_json::to_string(&Value::Object(filtered)).unwrap_or_default();
    content_fingerprint(normalized.as_bytes())
}

/// Strings pass through; numbers are stringified (source documents commonly
/// write `"version": 2`). Other shapes are ignored.
fn scalar_field(doc: &Map<String, Value>, key: &str) -> Option<String> {
    match doc.get(key) {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}

fn object_field(doc: &Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    match doc.get(key) {
        Some(Value::Object(map)) => Some(map.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn record(dir: &Path, name: &str, content: &str) -> FileRecord {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        FileRecord::from_path(&path).unwrap()
    }

    fn expect_entry(outcome: ReadOutcome) -> ManifestEntry {
        match outcome {
            ReadOutcome::Entry(entry) => entry,
            ReadOutcome::Skip { reason } => panic!("expected entry, got skip: {reason}"),
        }
    }

    #[test]
    fn json_reader_extracts_semantic_fields() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(
            dir.path(),
            "a.json",
            r#"{"version": "1.2", "format": "4", "mod": {"id": "m1"}, "metadata": {"tag": "x"}}"#,
        );

        let entry = expect_entry(read_json(&record).unwrap());
        assert_eq!(entry.kind, EntryKind::Json);
        assert_eq!(entry.version.as_deref(), Some("1.2"));
        assert_eq!(entry.format.as_deref(), Some("4"));
        assert_eq!(entry.mod_info.unwrap()["id"], "m1");
        assert_eq!(entry.metadata.unwrap()["tag"], "x");
        assert!(entry.fingerprint.unwrap().starts_with("b3:"));
    }

    #[test]
    fn json_reader_copies_descriptive_fields_into_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(
            dir.path(),
            "a.json",
            r#"{"name": "Alpha", "description": "first", "count": 3}"#,
        );

        let entry = expect_entry(read_json(&record).unwrap());
        let metadata = entry.metadata.unwrap();
        assert_eq!(metadata["name"], "Alpha");
        assert_eq!(metadata["description"], "first");
        assert!(!metadata.contains_key("count"));
    }

    #[test]
    fn empty_json_object_still_yields_a_minimal_entry() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(dir.path(), "a.json", "{}");

        let entry = expect_entry(read_json(&record).unwrap());
        assert_eq!(entry.kind, EntryKind::Json);
        assert_eq!(entry.version, None);
        assert_eq!(entry.metadata, None);
        assert!(entry.fingerprint.is_some());
    }

    #[test]
    fn invalid_json_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(dir.path(), "bad.json", "{broken");

        match read_json(&record).unwrap() {
            ReadOutcome::Skip { reason } => assert!(reason.contains("invalid JSON")),
            ReadOutcome::Entry(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn non_object_json_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(dir.path(), "list.json", "[1, 2, 3]");

        assert!(matches!(
            read_json(&record).unwrap(),
            ReadOutcome::Skip { .. }
        ));
    }

    #[test]
    fn numeric_version_is_stringified() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(dir.path(), "a.json", r#"{"version": 3}"#);

        let entry = expect_entry(read_json(&record).unwrap());
        assert_eq!(entry.version.as_deref(), Some("3"));
    }

    #[test]
    fn non_scalar_version_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(dir.path(), "a.json", r#"{"version": {"major": 1}}"#);

        let entry = expect_entry(read_json(&record).unwrap());
        assert_eq!(entry.version, None);
    }

    #[test]
    fn version_only_change_keeps_fingerprint_stable() {
        let dir = tempfile::tempdir().unwrap();
        let v1 = record(dir.path(), "v1.json", r#"{"version": "1", "format": "x"}"#);
        let v2 = record(dir.path(), "v2.json", r#"{"version": "2", "format": "x"}"#);

        let e1 = expect_entry(read_json(&v1).unwrap());
        let e2 = expect_entry(read_json(&v2).unwrap());
        assert_eq!(e1.fingerprint, e2.fingerprint);
    }

    #[test]
    fn content_change_changes_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let a = record(dir.path(), "a.json", r#"{"format": "x"}"#);
        let b = record(dir.path(), "b.json", r#"{"format": "y"}"#);

        let ea = expect_entry(read_json(&a).unwrap());
        let eb = expect_entry(read_json(&b).unwrap());
        assert_ne!(ea.fingerprint, eb.fingerprint);
    }

    #[test]
    fn binary_reader_produces_fingerprint_only() {
        let dir = tempfile::tempdir().unwrap();
        let record = record(dir.path(), "img.png", "pretend-image-bytes");

        let entry = expect_entry(read_binary(&record).unwrap());
        assert_eq!(entry.kind, EntryKind::Binary);
        assert_eq!(entry.version, None);
        assert!(entry.fingerprint.unwrap().starts_with("b3:"));
    }

    #[test]
    fn registry_covers_default_extensions() {
        for ext in ["json", "jsonc", "png", "jpg", "jpeg"] {
            assert!(reader_for(ext).is_some(), "missing reader for {ext}");
        }
        assert!(reader_for("txt").is_none());
    }
}
