//! The in-memory manifest model
//!
//! A [`Manifest`] is an ordered mapping from filename to [`ManifestEntry`],
//! bound to the folder it describes. Entries stay in natural filename order
//! at all times so diffing, reporting, and serialization agree on ordering.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use curator_fs::natural_cmp;

use crate::{Error, Result};

/// Catalogue filename used in every managed folder. The leading underscore
/// keeps the manifest itself out of scans.
pub const MANIFEST_FILE_NAME: &str = "_manifest.json";

/// Type discriminant for a catalogued file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Json,
    Binary,
}

/// One catalogued file's record within a manifest.
///
/// `version`, `format`, and `mod` are lifted from JSON sources when present;
/// binary and generic entries carry a fingerprint only. The filename is the
/// map key on the wire and is re-attached after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(skip)]
    pub filename: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "mod", skip_serializing_if = "Option::is_none")]
    pub mod_info: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl ManifestEntry {
    /// A minimal entry carrying no metadata beyond its type.
    pub fn minimal(filename: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            filename: filename.into(),
            kind,
            version: None,
            format: None,
            mod_info: None,
            metadata: None,
            fingerprint: None,
        }
    }
}

/// An ordered mapping from filename to entry plus the folder it describes.
#[derive(Debug, Clone)]
pub struct Manifest {
    folder: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// An empty manifest for the given folder.
    pub fn empty(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            entries: Vec::new(),
        }
    }

    /// Build a manifest from scanned entries.
    ///
    /// Filenames must be unique within a manifest; when duplicates occur the
    /// later entry in scan order wins and the superseded filenames are
    /// returned so callers can surface the overwrite.
    pub fn from_entries(
        folder: impl Into<PathBuf>,
        entries: Vec<ManifestEntry>,
    ) -> (Self, Vec<String>) {
        let mut manifest = Self::empty(folder);
        let mut superseded = Vec::new();

        for entry in entries {
            if let Some(existing) = manifest
                .entries
                .iter_mut()
                .find(|e| e.filename == entry.filename)
            {
                superseded.push(existing.filename.clone());
                *existing = entry;
            } else {
                manifest.entries.push(entry);
            }
        }

        manifest.sort();
        (manifest, superseded)
    }

    /// Parse a manifest file (a flat JSON object mapping filename to entry).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed content and [`Error::Io`] when
    /// the file cannot be read. Both are recoverable at the engine boundary.
    pub fn load(path: &Path) -> Result<Self> {
        let folder = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        let text = curator_fs::read_text(path)?;

        let raw: std::collections::BTreeMap<String, ManifestEntry> =
            serde_json::from_str(&text).map_err(|e| Error::parse(path, e))?;

        let entries = raw
            .into_iter()
            .map(|(filename, mut entry)| {
                entry.filename = filename;
                entry
            })
            .collect();

        let mut manifest = Self { folder, entries };
        manifest.sort();
        Ok(manifest)
    }

    /// The folder this manifest describes.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of the catalogue file inside the folder.
    pub fn path(&self) -> PathBuf {
        self.folder.join(MANIFEST_FILE_NAME)
    }

    /// Entries in natural filename order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn get(&self, filename: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| natural_cmp(&a.filename, &b.filename));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str) -> ManifestEntry {
        ManifestEntry::minimal(name, EntryKind::Json)
    }

    #[test]
    fn from_entries_keeps_natural_order() {
        let (manifest, superseded) = Manifest::from_entries(
            "/data",
            vec![entry("item10.json"), entry("item1.json"), entry("item2.json")],
        );

        let names: Vec<_> = manifest.entries().iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["item1.json", "item2.json", "item10.json"]);
        assert!(superseded.is_empty());
    }

    #[test]
    fn duplicate_filenames_later_wins() {
        let mut first = entry("a.json");
        first.version = Some("1".into());
        let mut second = entry("a.json");
        second.version = Some("2".into());

        let (manifest, superseded) = Manifest::from_entries("/data", vec![first, second]);

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("a.json").unwrap().version.as_deref(), Some("2"));
        assert_eq!(superseded, vec!["a.json"]);
    }

    #[test]
    fn load_attaches_filenames_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        std::fs::write(
            &path,
            r#"{
                "b2.json": {"type": "json", "version": "1"},
                "b10.json": {"type": "json"},
                "img.png": {"type": "binary", "fingerprint": "b3:aa:3"}
            }"#,
        )
        .unwrap();

        let manifest = Manifest::load(&path).unwrap();
        let names: Vec<_> = manifest.entries().iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["b2.json", "b10.json", "img.png"]);
        assert_eq!(manifest.get("b2.json").unwrap().version.as_deref(), Some("1"));
        assert_eq!(manifest.get("img.png").unwrap().kind, EntryKind::Binary);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(Manifest::load(&path), Err(Error::Parse { .. })));
    }

    #[test]
    fn manifest_path_is_inside_folder() {
        let manifest = Manifest::empty("/data/maps");
        assert_eq!(manifest.path(), PathBuf::from("/data/maps/_manifest.json"));
    }
}
