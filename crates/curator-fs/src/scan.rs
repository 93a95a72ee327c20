//! Folder scanning and inclusion rules
//!
//! Enumerates candidate catalogue files. Scanning is non-recursive: a folder
//! yields its immediate children only, and explicit directory inputs expand
//! one level. Hidden and underscore-prefixed names are never catalogue items.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::natural::natural_cmp;
use crate::{Error, Result};

/// Extensions recognised by the default allow-list.
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["json", "jsonc", "png", "jpg", "jpeg"];

/// A candidate file produced by scanning. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Full path to the file
    pub path: PathBuf,
    /// Base filename, used as the manifest key
    pub file_name: String,
    /// Lower-cased extension without the leading dot (may be empty)
    pub extension: String,
    /// Size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Build a record for an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not point to a readable file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        if !meta.is_file() {
            return Err(Error::validation(format!(
                "not a regular file: {}",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            extension,
            size: meta.len(),
        })
    }
}

/// Extension allow-list applied during scanning.
///
/// The default filter accepts [`DEFAULT_EXTENSIONS`] only. In allow-all mode
/// every non-hidden file passes and is later routed to the generic reader.
#[derive(Debug, Clone)]
pub struct ScanFilter {
    allowed: BTreeSet<String>,
    allow_all: bool,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            allow_all: false,
        }
    }
}

impl ScanFilter {
    /// A filter that accepts every non-hidden file.
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::default()
        }
    }

    /// Whether a file with this extension passes the allow-list.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.allow_all || self.allowed.contains(extension)
    }
}

/// Names starting with `.` or `_` are excluded from every scan.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Result of one scan: accepted records plus the names the allow-list
/// filtered out (reported as warnings by callers, never as errors).
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: Vec<FileRecord>,
    pub unsupported: Vec<String>,
}

impl ScanOutcome {
    fn push(&mut self, record: FileRecord, filter: &ScanFilter) {
        if filter.accepts_extension(&record.extension) {
            self.records.push(record);
        } else {
            tracing::warn!(file = %record.file_name, "unsupported file type skipped");
            self.unsupported.push(record.file_name);
        }
    }

    fn finish(mut self) -> Self {
        self.records
            .sort_by(|a, b| natural_cmp(&a.file_name, &b.file_name));
        self.unsupported.sort_by(|a, b| natural_cmp(a, b));
        self
    }
}

/// Enumerate the candidate files directly inside `folder`.
///
/// Subdirectories are not descended into. Hidden/underscored names and
/// directories are silently skipped; files rejected by the allow-list are
/// reported in [`ScanOutcome::unsupported`].
///
/// # Errors
///
/// Returns a validation error if `folder` is missing or not a directory.
pub fn scan_folder(folder: &Path, filter: &ScanFilter) -> Result<ScanOutcome> {
    if !folder.is_dir() {
        return Err(Error::validation(format!(
            "not a directory: {}",
            folder.display()
        )));
    }

    let mut outcome = ScanOutcome::default();
    let entries = fs::read_dir(folder).map_err(|e| Error::io(folder, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(folder, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden_name(&name) || path.is_dir() {
            continue;
        }
        outcome.push(FileRecord::from_path(&path)?, filter);
    }

    Ok(outcome.finish())
}

/// Expand explicit input paths into candidate files.
///
/// Files pass through directly; directories expand to their immediate
/// children (one level, no recursion). The same exclusion rules and
/// allow-list as [`scan_folder`] apply.
///
/// # Errors
///
/// Returns a validation error if any input path does not exist.
pub fn expand_inputs(inputs: &[PathBuf], filter: &ScanFilter) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();

    for input in inputs {
        if input.is_file() {
            let record = FileRecord::from_path(input)?;
            if is_hidden_name(&record.file_name) {
                continue;
            }
            outcome.push(record, filter);
        } else if input.is_dir() {
            let entries = fs::read_dir(input).map_err(|e| Error::io(input, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| Error::io(input, e))?;
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().into_owned();
                if is_hidden_name(&name) || !path.is_file() {
                    continue;
                }
                outcome.push(FileRecord::from_path(&path)?, filter);
            }
        } else {
            return Err(Error::validation(format!(
                "input path does not exist: {}",
                input.display()
            )));
        }
    }

    Ok(outcome.finish())
}
