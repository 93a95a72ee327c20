//! The live-import workflow state machine
//!
//! `Idle → Validated → Synced → Imported → ManifestUpdated → Committed →
//! Pushed → Done`, aborting at the failing state on fatal error. The machine
//! drives all git interaction through a [`GitRunner`], so every transition
//! is testable without a real repository.

use std::path::{Path, PathBuf};

use curator_manifest::{DiffResult, ImportOptions, copy_into};

use crate::message::{MessageOptions, build_commit_message};
use crate::repo::{commit_all, fast_forward, fetch, hard_reset, push, read_state};
use crate::runner::GitRunner;
use crate::{Error, Result};

/// Workflow progress marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Validated,
    Synced,
    Imported,
    ManifestUpdated,
    Committed,
    Pushed,
    Done,
    Aborted,
}

/// Options for one live import.
#[derive(Debug, Clone, Default)]
pub struct LiveImportOptions {
    pub dry_run: bool,
    pub allow_all: bool,
    /// Hard-reset to the tracking branch (and clean untracked files) instead
    /// of fast-forwarding. Destructive.
    pub hard_reset: bool,
    /// Skip remote synchronization entirely. Implies `skip_push`.
    pub skip_pull: bool,
    pub skip_push: bool,
    pub message: MessageOptions,
}

impl LiveImportOptions {
    /// Whether a push should happen: skipping the pull leaves the local
    /// branch potentially behind, so it always implies skipping the push.
    pub fn should_push(&self) -> bool {
        !self.skip_push && !self.skip_pull
    }
}

/// Outcome of a completed (or short-circuited) live import.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub state: WorkflowState,
    pub diff: DiffResult,
    pub commit_message: Option<String>,
    /// Human-readable narration of what was done; dry-run entries are
    /// prefixed with `[dry-run]`.
    pub actions: Vec<String>,
    pub warnings: Vec<String>,
}

/// One live-import invocation against a working copy.
pub struct LiveImport<'a, R: GitRunner> {
    runner: &'a R,
    repo: PathBuf,
    inputs: Vec<PathBuf>,
    /// Destination folder, relative to the repository root.
    dest: String,
    options: LiveImportOptions,
}

impl<'a, R: GitRunner> LiveImport<'a, R> {
    pub fn new(
        runner: &'a R,
        repo: impl Into<PathBuf>,
        inputs: Vec<PathBuf>,
        dest: impl Into<String>,
        options: LiveImportOptions,
    ) -> Self {
        Self {
            runner,
            repo: repo.into(),
            inputs,
            dest: dest.into(),
            options,
        }
    }

    /// Drive the machine to `Done`.
    ///
    /// # Errors
    ///
    /// Any error aborts the workflow at the state it occurred in; no
    /// partial recovery is attempted.
    pub fn run(&self) -> Result<WorkflowReport> {
        let mut report = WorkflowReport {
            state: WorkflowState::Idle,
            diff: DiffResult::default(),
            commit_message: None,
            actions: Vec::new(),
            warnings: Vec::new(),
        };

        let outcome = self.drive(&mut report);
        if let Err(e) = &outcome {
            tracing::error!(state = ?report.state, error = %e, "live import aborted");
            report.state = WorkflowState::Aborted;
        }
        outcome.map(|()| report)
    }

    fn drive(&self, report: &mut WorkflowReport) -> Result<()> {
        let dest_path = self.validate()?;
        report.state = WorkflowState::Validated;

        self.sync(report)?;
        report.state = WorkflowState::Synced;

        let import = copy_into(
            &self.inputs,
            &dest_path,
            &ImportOptions {
                dry_run: self.options.dry_run,
                allow_all: self.options.allow_all,
            },
        )?;
        report.state = WorkflowState::Imported;
        self.record(
            report,
            format!("copied {} file(s) into {}", import.copied.len(), self.dest),
        );
        for skipped in &import.skipped {
            report.warnings.push(format!(
                "copy skipped, unchanged apart from version: {}",
                skipped.display()
            ));
        }

        report.warnings.extend(import.update.warnings.clone());
        report.diff = import.update.diff.clone();
        report.state = WorkflowState::ManifestUpdated;

        if report.diff.is_empty() {
            tracing::info!("no manifest changes, skipping commit and push");
            report.actions.push("no changes, nothing to commit".to_string());
            report.state = WorkflowState::Done;
            return Ok(());
        }

        let message = build_commit_message(&report.diff, &self.dest, &self.options.message);
        if !self.options.dry_run {
            commit_all(self.runner, &self.repo, &message)?;
        }
        self.record(report, "committed changes".to_string());
        report.commit_message = Some(message);
        report.state = WorkflowState::Committed;

        if self.options.should_push() {
            if !self.options.dry_run {
                push(self.runner, &self.repo)?;
            }
            self.record(report, "pushed to tracking branch".to_string());
            report.state = WorkflowState::Pushed;
        } else {
            report.actions.push("push skipped".to_string());
        }

        report.state = WorkflowState::Done;
        Ok(())
    }

    /// Repo must be a working copy; the destination must be a relative,
    /// traversal-free path to an existing directory inside it.
    fn validate(&self) -> Result<PathBuf> {
        let repo = dunce::canonicalize(&self.repo).map_err(|e| Error::io(&self.repo, e))?;
        if !repo.join(".git").is_dir() {
            return Err(Error::validation(format!(
                "not a git repository (missing .git): {}",
                repo.display()
            )));
        }

        let dest = Path::new(&self.dest);
        if dest.is_absolute() {
            return Err(Error::validation(
                "destination must be a relative path inside the repository",
            ));
        }
        if dest
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(Error::validation(
                "destination must not contain parent traversal (..)",
            ));
        }

        let resolved = dunce::canonicalize(repo.join(dest)).map_err(|_| {
            Error::validation(format!("destination must be an existing directory: {}", self.dest))
        })?;
        if !resolved.starts_with(&repo) || !resolved.is_dir() {
            return Err(Error::validation(format!(
                "destination must be a directory inside the repository: {}",
                self.dest
            )));
        }

        Ok(resolved)
    }

    /// Remote synchronization. The cleanliness check runs even under
    /// dry-run; only the mutating commands are suppressed.
    fn sync(&self, report: &mut WorkflowReport) -> Result<()> {
        if self.options.skip_pull {
            report.actions.push("remote sync skipped".to_string());
            return Ok(());
        }

        let state = read_state(self.runner, &self.repo)?;
        if state.dirty {
            return Err(Error::DirtyRepo {
                path: self.repo.clone(),
            });
        }

        let Some(tracking) = state.tracking else {
            return Err(Error::validation(format!(
                "branch {} has no tracking branch configured",
                state.branch
            )));
        };

        if !self.options.dry_run {
            fetch(self.runner, &self.repo)?;
        }
        self.record(report, "fetched remote (prune)".to_string());

        if self.options.hard_reset {
            if !self.options.dry_run {
                hard_reset(self.runner, &self.repo, &tracking)?;
            }
            self.record(report, format!("hard reset to {tracking}, cleaned untracked"));
        } else {
            if !self.options.dry_run {
                fast_forward(self.runner, &self.repo, &tracking)?;
            }
            self.record(report, format!("fast-forwarded to {tracking}"));
        }

        Ok(())
    }

    fn record(&self, report: &mut WorkflowReport, action: String) {
        if self.options.dry_run {
            report.actions.push(format!("[dry-run] would have {action}"));
        } else {
            report.actions.push(action);
        }
    }
}
