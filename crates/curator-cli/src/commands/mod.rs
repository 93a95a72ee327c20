//! Command implementations for curator-cli

pub mod add;
pub mod import;
pub mod update;

pub use add::run_add_files;
pub use import::run_live_import;
pub use update::run_update_manifest;

use colored::Colorize;
use curator_manifest::DiffResult;

/// Process exit code for a dry run that found pending changes.
pub const EXIT_WOULD_CHANGE: i32 = 2;

/// Exit code for a computed diff: changes found under dry-run exit with
/// [`EXIT_WOULD_CHANGE`] so scripts can detect drift.
pub(crate) fn exit_code(diff: &DiffResult, dry_run: bool) -> i32 {
    if dry_run && !diff.is_empty() {
        EXIT_WOULD_CHANGE
    } else {
        0
    }
}

/// Print the added/updated/removed summary unless quiet.
pub(crate) fn print_diff(diff: &DiffResult, quiet: bool) {
    if quiet {
        return;
    }
    if diff.is_empty() {
        println!("{}", "No changes.".green());
        return;
    }
    println!(
        "{} added, {} updated, {} removed",
        diff.added.len().to_string().green(),
        diff.updated.len().to_string().yellow(),
        diff.removed.len().to_string().red(),
    );
    for change in &diff.added {
        println!("  {} {}", "+".green(), change.filename);
    }
    for change in &diff.updated {
        println!("  {} {}", "~".yellow(), change.filename);
    }
    for change in &diff.removed {
        println!("  {} {}", "-".red(), change.filename);
    }
}

/// Print recoverable per-file warnings unless quiet.
pub(crate) fn print_warnings(warnings: &[String], quiet: bool) {
    if quiet {
        return;
    }
    for warning in warnings {
        eprintln!("{}: {warning}", "warning".yellow().bold());
    }
}
