//! Import application: copy inputs into a folder, then update its manifest
//!
//! Shared by the plain add-files command and the live repository workflow.

use std::fs;
use std::path::{Path, PathBuf};

use curator_fs::{FileRecord, expand_inputs};

use crate::engine::{UpdateOptions, UpdateReport, scan_entries, update_folder, update_from_entries};
use crate::entry::ManifestEntry;
use crate::reader::{ReadOutcome, read_generic, reader_for};
use crate::{Error, Result};

/// Extensions whose entries tolerate a version-only difference: re-copying
/// such a file would dirty the tree without changing anything the manifest
/// tracks.
const VERSION_TOLERANT_EXTENSIONS: [&str; 2] = ["json", "jsonc"];

/// Options for one import operation.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub allow_all: bool,
}

impl ImportOptions {
    fn update_options(&self) -> UpdateOptions {
        UpdateOptions::new(self.dry_run, self.allow_all)
    }
}

/// Outcome of one import: which inputs were copied (or would be, under
/// dry-run), which were skipped, and the resulting manifest update.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub update: UpdateReport,
}

/// Copy input files into `dest` and update its manifest.
///
/// Directory inputs expand one level. A JSON input that differs from the
/// file already at the destination only in its version is not copied.
/// Under dry-run nothing is created or copied; the reported diff is
/// computed from the prospective post-copy state instead.
pub fn copy_into(inputs: &[PathBuf], dest: &Path, options: &ImportOptions) -> Result<ImportReport> {
    let update_options = options.update_options();
    let outcome = expand_inputs(inputs, &update_options.filter)?;

    if !options.dry_run {
        fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    }

    let mut copied = Vec::new();
    let mut skipped = Vec::new();
    let mut imported = Vec::new();
    for record in &outcome.records {
        let target = dest.join(&record.file_name);

        if is_version_only_change(record, &target)? {
            tracing::info!(file = %record.file_name, "unchanged apart from version, copy skipped");
            skipped.push(record.path.clone());
            continue;
        }

        if !options.dry_run {
            fs::copy(&record.path, &target).map_err(|e| Error::io(&target, e))?;
        }
        copied.push(record.path.clone());
        imported.push(record.clone());
    }

    let mut update = if options.dry_run {
        dry_run_update(&imported, dest, &update_options)?
    } else {
        update_folder(dest, &update_options)?
    };

    // Filtered inputs never reach the destination, so the folder update
    // cannot report them; surface them here.
    let mut warnings: Vec<String> = outcome
        .unsupported
        .iter()
        .map(|name| format!("unsupported input not imported: {name}"))
        .collect();
    warnings.append(&mut update.warnings);
    update.warnings = warnings;

    Ok(ImportReport {
        copied,
        skipped,
        update,
    })
}

/// Diff the destination as it would look after the copy, without copying:
/// current destination entries overlaid with entries read from the inputs
/// that would actually be copied (version-only skips are left out, so the
/// predicted diff matches what a real run would perform). Fingerprints are
/// content-derived, so reading from the source path yields the same entry
/// the post-copy scan would.
fn dry_run_update(
    records: &[FileRecord],
    dest: &Path,
    options: &UpdateOptions,
) -> Result<UpdateReport> {
    let (mut entries, _) = if dest.is_dir() {
        scan_entries(dest, &options.filter)?
    } else {
        (Vec::new(), Vec::new())
    };

    for record in records {
        let read = reader_for(&record.extension).unwrap_or(read_generic);
        if let ReadOutcome::Entry(entry) = read(record)? {
            entries.retain(|e: &ManifestEntry| e.filename != entry.filename);
            entries.push(entry);
        }
    }

    update_from_entries(dest, entries, options)
}

/// Whether copying `record` over the existing `target` would change nothing
/// but the version field.
fn is_version_only_change(record: &FileRecord, target: &Path) -> Result<bool> {
    if !VERSION_TOLERANT_EXTENSIONS.contains(&record.extension.as_str()) || !target.is_file() {
        return Ok(false);
    }
    let Some(read) = reader_for(&record.extension) else {
        return Ok(false);
    };

    let incoming = match read(record)? {
        ReadOutcome::Entry(entry) => entry,
        ReadOutcome::Skip { .. } => return Ok(false),
    };
    let existing_record = FileRecord::from_path(target)?;
    let existing = match read(&existing_record)? {
        ReadOutcome::Entry(entry) => entry,
        ReadOutcome::Skip { .. } => return Ok(false),
    };

    Ok(matches_ignoring_version(&incoming, &existing))
}

fn matches_ignoring_version(a: &ManifestEntry, b: &ManifestEntry) -> bool {
    let mut a = a.clone();
    let mut b = b.clone();
    a.version = None;
    b.version = None;
    // Filenames differ (source vs destination path); the comparison is about
    // content, so align them.
    b.filename = a.filename.clone();
    a == b
}
