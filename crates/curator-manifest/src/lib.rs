//! Manifest model, metadata readers, diffing, and deterministic output
//!
//! A manifest (`_manifest.json`) catalogues the data files of one folder.
//! This crate owns the full update cycle: scan a folder, extract per-type
//! metadata, diff against the persisted manifest, and rewrite (or delete)
//! the catalogue in a byte-stable canonical form.

pub mod apply;
pub mod diff;
pub mod engine;
pub mod entry;
pub mod error;
pub mod reader;
pub mod writer;

pub use apply::{ImportOptions, ImportReport, copy_into};
pub use diff::{DiffResult, EntryChange, diff_entries};
pub use engine::{
    PersistAction, UpdateOptions, UpdateReport, resolve_target, scan_entries, update_folder,
    update_from_entries,
};
pub use entry::{EntryKind, MANIFEST_FILE_NAME, Manifest, ManifestEntry};
pub use error::{Error, Result};
pub use reader::{MetadataReader, ReadOutcome, read_binary, read_generic, read_json, reader_for};
