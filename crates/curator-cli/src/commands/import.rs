//! The live-import command

use std::path::PathBuf;

use colored::Colorize;
use curator_git::{LiveImport, LiveImportOptions, MessageOptions, SystemGit};

use crate::commands::{exit_code, print_diff, print_warnings};
use crate::error::Result;

pub struct LiveImportArgs {
    pub repo: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub dest: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub exclude_file_list: bool,
    pub hard_reset: bool,
    pub skip_pull: bool,
    pub skip_push: bool,
    pub dry_run: bool,
    pub allow_all: bool,
    pub quiet: bool,
}

pub fn run_live_import(args: LiveImportArgs) -> Result<i32> {
    if args.dry_run && !args.quiet {
        println!("{}", "Dry run enabled".cyan().bold());
    }

    let git = SystemGit::discover()?;
    let options = LiveImportOptions {
        dry_run: args.dry_run,
        allow_all: args.allow_all,
        hard_reset: args.hard_reset,
        skip_pull: args.skip_pull,
        skip_push: args.skip_push,
        message: MessageOptions {
            title: args.title,
            body: args.body,
            exclude_file_list: args.exclude_file_list,
        },
    };

    let workflow = LiveImport::new(&git, args.repo, args.inputs, args.dest, options);
    let report = workflow.run()?;

    if !args.quiet {
        for action in &report.actions {
            println!("  {} {action}", "*".green());
        }
    }
    print_warnings(&report.warnings, args.quiet);
    print_diff(&report.diff, args.quiet);

    if !args.quiet {
        if let Some(message) = &report.commit_message {
            println!("{}", "Commit message:".bold());
            println!("{message}");
        }
        println!("{}", "Live import completed.".green().bold());
    }

    Ok(exit_code(&report.diff, args.dry_run))
}
