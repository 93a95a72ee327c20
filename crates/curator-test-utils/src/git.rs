//! Git repository fixtures at two realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs —
//! fakes are faster and have fewer external dependencies.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Creates a minimal `.git` directory structure **without** initialising a
/// real git repository.
///
/// Realism level: **FAKE** — directory structure only, no git object store.
///
/// Use for: tests that need a `.git` marker to satisfy working-copy
/// detection but drive git through a scripted runner.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Runs a git command in `path`, panicking on failure.
///
/// # Panics
/// Panics if the command cannot be spawned or exits non-zero.
pub fn git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Initialises a real git repository with an initial commit using the
/// `git` CLI.
///
/// Realism level: **REAL WITH HISTORY** — valid git state, `main` branch,
/// one commit in history.
///
/// Specifically:
/// - Runs `git init`
/// - Configures `user.email`, `user.name`, and `commit.gpgsign = false`
/// - Creates `README.md` and makes an initial commit
/// - Renames the default branch to `main`
///
/// # Panics
/// Panics if any git operation fails.
pub fn init_repo_with_commit(path: &Path) {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("init_repo_with_commit: failed to write README.md: {e}"));

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
    // Best-effort: older git versions may not support this flag
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}

/// Creates a bare upstream plus a clone whose `main` tracks it.
///
/// Realism level: **REAL WITH REMOTE** — full push/fetch round-trips work
/// against the bare repository on the local filesystem.
///
/// Returns `(bare_path, clone_path)` inside `root`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn clone_with_remote(root: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let bare = root.join("upstream.git");
    let clone = root.join("clone");
    fs::create_dir(&bare).unwrap_or_else(|e| panic!("clone_with_remote: {e}"));

    git(&bare, &["init", "--bare"]);
    // Older git versions default the bare HEAD to `master`; point it at
    // `main` so `git log` works there once the clone pushes.
    git(&bare, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(root, &["clone", "upstream.git", "clone"]);
    git(&clone, &["config", "user.email", "test@test.com"]);
    git(&clone, &["config", "user.name", "Test User"]);
    git(&clone, &["config", "commit.gpgsign", "false"]);

    fs::write(clone.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("clone_with_remote: failed to write README.md: {e}"));
    git(&clone, &["add", "."]);
    git(&clone, &["commit", "-m", "Initial commit"]);
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(&clone)
        .output();
    git(&clone, &["push", "--set-upstream", "origin", "main"]);

    (bare, clone)
}
