//! The update-manifest command

use std::path::Path;

use colored::Colorize;
use curator_manifest::{PersistAction, UpdateOptions, update_folder};

use crate::commands::{exit_code, print_diff, print_warnings};
use crate::error::Result;

pub fn run_update_manifest(
    target: &Path,
    dry_run: bool,
    allow_all: bool,
    quiet: bool,
) -> Result<i32> {
    let options = UpdateOptions::new(dry_run, allow_all);
    let report = update_folder(target, &options)?;

    print_warnings(&report.warnings, quiet);
    print_diff(&report.diff, quiet);

    if !quiet {
        let manifest = report.folder.join(curator_manifest::MANIFEST_FILE_NAME);
        match (report.action, dry_run) {
            (PersistAction::Written, false) => {
                println!("Wrote {}", manifest.display().to_string().cyan());
            }
            (PersistAction::Written, true) => {
                println!("Would write {}", manifest.display().to_string().cyan());
            }
            (PersistAction::Deleted, false) => {
                println!("Deleted {}", manifest.display().to_string().cyan());
            }
            (PersistAction::Deleted, true) => {
                println!("Would delete {}", manifest.display().to_string().cyan());
            }
            (PersistAction::Unchanged, _) => {}
        }
    }

    Ok(exit_code(&report.diff, dry_run))
}
