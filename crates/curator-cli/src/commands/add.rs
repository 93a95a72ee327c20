//! The add-files command

use std::path::{Path, PathBuf};

use colored::Colorize;
use curator_manifest::{ImportOptions, copy_into};

use crate::commands::{exit_code, print_diff, print_warnings};
use crate::error::Result;

pub fn run_add_files(
    inputs: &[PathBuf],
    dest: &Path,
    dry_run: bool,
    allow_all: bool,
    quiet: bool,
) -> Result<i32> {
    let options = ImportOptions { dry_run, allow_all };
    let report = copy_into(inputs, dest, &options)?;

    if !quiet {
        let arrow = if dry_run { "would copy" } else { "copied" };
        for path in &report.copied {
            println!("  {} {} {}", "*".green(), arrow, path.display());
        }
        for path in &report.skipped {
            println!(
                "  {} {} unchanged (ignoring version); copy skipped",
                "*".yellow(),
                path.display()
            );
        }
    }

    print_warnings(&report.update.warnings, quiet);
    print_diff(&report.update.diff, quiet);

    Ok(exit_code(&report.update.diff, dry_run))
}
