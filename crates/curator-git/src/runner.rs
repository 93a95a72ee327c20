//! Structured git command execution
//!
//! All repository operations go through [`GitRunner`]: arguments in, exit
//! status and captured output out. The workflow state machine never spawns
//! processes directly, so it can be exercised with a scripted runner in
//! tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Stdout with surrounding whitespace trimmed.
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }
}

/// Executes git commands against one working copy.
pub trait GitRunner {
    /// Run `git <args>` in the repository, capturing output. A non-zero exit
    /// is returned as a normal [`CommandOutput`], not an error; only failure
    /// to launch the process errors.
    fn run(&self, repo: &Path, args: &[&str]) -> Result<CommandOutput>;

    /// Run `git <args>` and fail on non-zero exit.
    fn run_checked(&self, repo: &Path, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(repo, args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Error::CommandFailed {
                command: args.join(" "),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

/// The real git executable, resolved from PATH once at construction.
#[derive(Debug, Clone)]
pub struct SystemGit {
    executable: PathBuf,
}

impl SystemGit {
    /// Resolve `git` on the search path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GitUnavailable`] if no executable is found.
    pub fn discover() -> Result<Self> {
        let executable = which::which("git").map_err(|_| Error::GitUnavailable)?;
        tracing::debug!(executable = %executable.display(), "git resolved");
        Ok(Self { executable })
    }
}

impl GitRunner for SystemGit {
    fn run(&self, repo: &Path, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!(repo = %repo.display(), command = %args.join(" "), "git");

        let output = Command::new(&self.executable)
            .current_dir(repo)
            .args(args)
            .output()
            .map_err(|e| Error::io(&self.executable, e))?;

        Ok(CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_checked_maps_failure_to_command_failed() {
        struct Failing;
        impl GitRunner for Failing {
            fn run(&self, _repo: &Path, _args: &[&str]) -> Result<CommandOutput> {
                Ok(CommandOutput {
                    code: 128,
                    stdout: String::new(),
                    stderr: "fatal: not a git repository\n".to_string(),
                })
            }
        }

        let err = Failing
            .run_checked(Path::new("/tmp"), &["status", "--porcelain"])
            .unwrap_err();
        match err {
            Error::CommandFailed { command, code, stderr } => {
                assert_eq!(command, "status --porcelain");
                assert_eq!(code, 128);
                assert_eq!(stderr, "fatal: not a git repository");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn output_text_trims_stdout() {
        let output = CommandOutput {
            code: 0,
            stdout: "main\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.text(), "main");
    }
}
