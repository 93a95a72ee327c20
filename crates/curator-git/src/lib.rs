//! Git synchronization for Curator
//!
//! Drives the live-import workflow over the external `git` executable:
//! structured command execution ([`runner`]), repository state and sync
//! primitives ([`repo`]), commit-message rendering ([`message`]), and the
//! state machine tying them together ([`workflow`]).

pub mod error;
pub mod message;
pub mod repo;
pub mod runner;
pub mod workflow;

pub use error::{Error, Result};
pub use message::{DEFAULT_TITLE, MessageOptions, build_commit_message, build_file_change_list};
pub use repo::{RepoState, read_state};
pub use runner::{CommandOutput, GitRunner, SystemGit};
pub use workflow::{LiveImport, LiveImportOptions, WorkflowReport, WorkflowState};
