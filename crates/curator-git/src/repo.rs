//! Repository state and synchronization primitives
//!
//! Thin, well-typed wrappers over individual git commands. The tracking
//! branch is always read from the repository (`@{u}`), never assumed.

use std::path::Path;

use crate::runner::GitRunner;
use crate::{Error, Result};

/// Transient snapshot of a working copy. Recomputed per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoState {
    pub branch: String,
    /// Remote tracking branch (e.g. `origin/main`), if one is configured.
    pub tracking: Option<String>,
    pub dirty: bool,
    pub ahead: u32,
    pub behind: u32,
}

/// Read the current branch, tracking branch, cleanliness, and divergence.
pub fn read_state<R: GitRunner>(runner: &R, repo: &Path) -> Result<RepoState> {
    let branch = runner
        .run_checked(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?
        .text()
        .to_string();

    // No upstream configured is a normal state, not an error.
    let upstream = runner.run(
        repo,
        &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
    )?;
    let tracking = upstream.success().then(|| upstream.text().to_string());

    let status = runner.run_checked(repo, &["status", "--porcelain"])?;
    let dirty = !status.text().is_empty();

    let (ahead, behind) = match &tracking {
        Some(tracking) => {
            let range = format!("HEAD...{tracking}");
            let counts = runner.run_checked(
                repo,
                &["rev-list", "--left-right", "--count", &range],
            )?;
            parse_divergence(counts.text())?
        }
        None => (0, 0),
    };

    let state = RepoState {
        branch,
        tracking,
        dirty,
        ahead,
        behind,
    };
    tracing::debug!(?state, repo = %repo.display(), "repository state");
    Ok(state)
}

/// Fetch from the default remote, pruning stale remote-tracking refs.
pub fn fetch<R: GitRunner>(runner: &R, repo: &Path) -> Result<()> {
    runner.run_checked(repo, &["fetch", "--prune"])?;
    Ok(())
}

/// Fast-forward the current branch onto its tracking branch.
///
/// # Errors
///
/// Returns [`Error::FastForward`] when the branches have diverged.
pub fn fast_forward<R: GitRunner>(runner: &R, repo: &Path, tracking: &str) -> Result<()> {
    let output = runner.run(repo, &["merge", "--ff-only", tracking])?;
    if output.success() {
        Ok(())
    } else {
        Err(Error::FastForward {
            message: output.stderr.trim().to_string(),
        })
    }
}

/// Hard-reset the current branch to its tracking branch and remove
/// untracked files and directories. Destructive.
pub fn hard_reset<R: GitRunner>(runner: &R, repo: &Path, tracking: &str) -> Result<()> {
    runner.run_checked(repo, &["reset", "--hard", tracking])?;
    runner.run_checked(repo, &["clean", "-fd"])?;
    Ok(())
}

/// Stage everything and commit with the given message.
pub fn commit_all<R: GitRunner>(runner: &R, repo: &Path, message: &str) -> Result<()> {
    runner.run_checked(repo, &["add", "--all"])?;
    runner.run_checked(repo, &["commit", "-m", message])?;
    Ok(())
}

/// Push the current branch to its tracking remote.
///
/// # Errors
///
/// Returns [`Error::PushRejected`] on a non-zero push; callers re-run after
/// resolving upstream state, the push is never retried automatically.
pub fn push<R: GitRunner>(runner: &R, repo: &Path) -> Result<()> {
    let output = runner.run(repo, &["push"])?;
    if output.success() {
        Ok(())
    } else {
        Err(Error::PushRejected {
            message: output.stderr.trim().to_string(),
        })
    }
}

/// Parse `git rev-list --left-right --count HEAD...<tracking>` output.
fn parse_divergence(text: &str) -> Result<(u32, u32)> {
    let mut parts = text.split_whitespace();
    let ahead = parts.next().and_then(|n| n.parse().ok());
    let behind = parts.next().and_then(|n| n.parse().ok());
    match (ahead, behind) {
        (Some(ahead), Some(behind)) => Ok((ahead, behind)),
        _ => Err(Error::validation(format!(
            "unexpected rev-list output: {text:?}"
        ))),
    }
}
