//! The diff & update engine
//!
//! Orchestrates one manifest update: scan the folder, extract entries, diff
//! against the persisted manifest, and hand the result to the writer. The
//! engine owns the manifest exclusively for the duration of one update; all
//! state lives in the report it returns.

use std::path::{Path, PathBuf};

use curator_fs::{ScanFilter, scan_folder};

use crate::diff::{DiffResult, diff_entries};
use crate::entry::{MANIFEST_FILE_NAME, Manifest, ManifestEntry};
use crate::reader::{ReadOutcome, read_generic, reader_for};
use crate::writer;
use crate::{Error, Result};

/// Options threaded through one update invocation.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Compute the diff but perform no write or delete.
    pub dry_run: bool,
    pub filter: ScanFilter,
}

impl UpdateOptions {
    pub fn new(dry_run: bool, allow_all: bool) -> Self {
        Self {
            dry_run,
            filter: if allow_all {
                ScanFilter::allow_all()
            } else {
                ScanFilter::default()
            },
        }
    }
}

/// What happened (or, under dry-run, would happen) to the persisted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistAction {
    Written,
    Deleted,
    Unchanged,
}

/// Outcome of one update operation.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub folder: PathBuf,
    pub diff: DiffResult,
    pub action: PersistAction,
    /// Per-file problems that did not abort the update: unsupported types,
    /// skipped unreadable documents, superseded duplicates, a malformed
    /// prior manifest.
    pub warnings: Vec<String>,
}

/// Normalize an update target to the folder it describes.
///
/// Accepts either a folder or a path to its catalogue file.
pub fn resolve_target(target: &Path) -> Result<PathBuf> {
    if target.is_dir() {
        return Ok(target.to_path_buf());
    }
    if target.file_name().is_some_and(|n| n == MANIFEST_FILE_NAME) {
        if let Some(parent) = target.parent() {
            if parent.is_dir() {
                return Ok(parent.to_path_buf());
            }
        }
    }
    Err(Error::Fs(curator_fs::Error::validation(format!(
        "target must be a folder or a {MANIFEST_FILE_NAME} path: {}",
        target.display()
    ))))
}

/// Scan a folder and run every accepted file through its metadata reader.
///
/// In allow-all mode files with no registered reader fall back to the
/// generic fingerprint reader. Per-file skips become warnings.
pub fn scan_entries(
    folder: &Path,
    filter: &ScanFilter,
) -> Result<(Vec<ManifestEntry>, Vec<String>)> {
    let outcome = scan_folder(folder, filter)?;

    let mut entries = Vec::with_capacity(outcome.records.len());
    let mut warnings: Vec<String> = outcome
        .unsupported
        .iter()
        .map(|name| format!("unsupported file type skipped: {name}"))
        .collect();

    for record in &outcome.records {
        let read = reader_for(&record.extension).unwrap_or(read_generic);
        match read(record)? {
            ReadOutcome::Entry(entry) => entries.push(entry),
            ReadOutcome::Skip { reason } => {
                warnings.push(format!("{}: {reason}", record.file_name));
            }
        }
    }

    Ok((entries, warnings))
}

/// Diff scanned entries against the persisted manifest and persist the
/// result. A malformed prior manifest is recoverable: manifests are
/// regenerable, so it is logged and treated as empty.
pub fn update_from_entries(
    folder: &Path,
    entries: Vec<ManifestEntry>,
    options: &UpdateOptions,
) -> Result<UpdateReport> {
    let manifest_path = folder.join(MANIFEST_FILE_NAME);
    let mut warnings = Vec::new();

    let before = if manifest_path.is_file() {
        match Manifest::load(&manifest_path) {
            Ok(manifest) => manifest,
            Err(Error::Parse { path, message }) => {
                tracing::warn!(path = %path.display(), %message, "malformed manifest, rebuilding from folder");
                warnings.push(format!("malformed manifest rebuilt: {message}"));
                Manifest::empty(folder)
            }
            Err(e) => return Err(e),
        }
    } else {
        Manifest::empty(folder)
    };

    let (after, superseded) = Manifest::from_entries(folder, entries);
    for name in superseded {
        tracing::warn!(file = %name, "duplicate scanned filename, later entry wins");
        warnings.push(format!("duplicate filename overwritten: {name}"));
    }

    let diff = diff_entries(&before, &after);

    let action = if after.is_empty() {
        if manifest_path.is_file() {
            if !options.dry_run {
                writer::delete(&manifest_path)?;
            }
            PersistAction::Deleted
        } else {
            PersistAction::Unchanged
        }
    } else if diff.is_empty() && manifest_path.is_file() {
        PersistAction::Unchanged
    } else {
        if !options.dry_run {
            writer::write(&after)?;
        }
        PersistAction::Written
    };

    tracing::info!(
        folder = %folder.display(),
        added = diff.added.len(),
        updated = diff.updated.len(),
        removed = diff.removed.len(),
        dry_run = options.dry_run,
        "manifest update computed"
    );

    Ok(UpdateReport {
        folder: folder.to_path_buf(),
        diff,
        action,
        warnings,
    })
}

/// Full update cycle for a folder (or a manifest path inside it).
pub fn update_folder(target: &Path, options: &UpdateOptions) -> Result<UpdateReport> {
    let folder = resolve_target(target)?;
    let (entries, scan_warnings) = scan_entries(&folder, &options.filter)?;

    let mut report = update_from_entries(&folder, entries, options)?;
    let mut warnings = scan_warnings;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;
    Ok(report)
}
