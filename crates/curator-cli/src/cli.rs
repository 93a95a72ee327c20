//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Curator - maintain per-folder data catalogues and sync them into git
#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Rebuild the catalogue for a folder
    ///
    /// Scans the folder, extracts per-type metadata, and rewrites (or
    /// deletes) its _manifest.json in canonical form.
    UpdateManifest {
        /// Folder to catalogue, or a path to its _manifest.json
        target: PathBuf,

        /// Compute and report changes without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Catalogue files normally filtered out by the type allow-list
        #[arg(short = 'a', long = "allow-all", alias = "all")]
        allow_all: bool,
    },

    /// Copy files into a folder and update its catalogue
    AddFiles {
        /// Input files or directories (directories expand one level)
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Destination folder (created if missing)
        dest: PathBuf,

        /// Compute and report changes without copying or writing
        #[arg(long)]
        dry_run: bool,

        /// Import files normally filtered out by the type allow-list
        #[arg(short = 'a', long = "allow-all", alias = "all")]
        allow_all: bool,
    },

    /// Import files into a live git repository
    ///
    /// Synchronizes the working copy with its remote, copies the inputs
    /// into the destination folder, updates the catalogue, then commits
    /// and pushes the result.
    LiveImport {
        /// Path to the local git clone to manage
        #[arg(short, long)]
        repo: PathBuf,

        /// Input files or directories (directories expand one level)
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Destination folder, relative to the repository root
        dest: String,

        /// Title line for the commit message; supports $added, $updated,
        /// $removed, $total, and $path placeholders
        #[arg(short, long)]
        title: Option<String>,

        /// Body paragraph for the commit message (same placeholders)
        #[arg(short, long)]
        body: Option<String>,

        /// Exclude the file change list from the commit message
        #[arg(long)]
        exclude_file_list: bool,

        /// Hard-reset to the tracking branch before importing (destructive)
        #[arg(long)]
        hard_reset: bool,

        /// Skip remote synchronization entirely (implies --skip-push)
        #[arg(long)]
        skip_pull: bool,

        /// Skip pushing the commit to the remote
        #[arg(long)]
        skip_push: bool,

        /// Report every step without touching the repository
        #[arg(long)]
        dry_run: bool,

        /// Import files normally filtered out by the type allow-list
        #[arg(short = 'a', long = "allow-all", alias = "all")]
        allow_all: bool,
    },
}
