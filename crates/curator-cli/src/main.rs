//! Curator CLI
//!
//! The command-line interface for maintaining per-folder data catalogues
//! and synchronizing them into git repositories.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::import::LiveImportArgs;
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let quiet = cli.quiet;
    match cli.command {
        Commands::UpdateManifest {
            target,
            dry_run,
            allow_all,
        } => commands::run_update_manifest(&target, dry_run, allow_all, quiet),
        Commands::AddFiles {
            inputs,
            dest,
            dry_run,
            allow_all,
        } => commands::run_add_files(&inputs, &dest, dry_run, allow_all, quiet),
        Commands::LiveImport {
            repo,
            inputs,
            dest,
            title,
            body,
            exclude_file_list,
            hard_reset,
            skip_pull,
            skip_push,
            dry_run,
            allow_all,
        } => commands::run_live_import(LiveImportArgs {
            repo,
            inputs,
            dest,
            title,
            body,
            exclude_file_list,
            hard_reset,
            skip_pull,
            skip_push,
            dry_run,
            allow_all,
            quiet,
        }),
    }
}
