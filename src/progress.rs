//! Progress reporting hooks
//!
//! The library never prints. It reports what it is doing through a
//! [`ProgressCallback`] and leaves rendering to the caller.

use std::fmt;

/// A step of the push-and-reconcile workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// About to run `git push`
    Pushing {
        /// Remote name
        remote: String,
        /// Branch being pushed
        branch: String,
        /// Whether `--force` is passed
        force: bool,
    },
    /// `git push` succeeded
    Pushed {
        /// Branch that was pushed
        branch: String,
    },
    /// An open merge request already exists
    FoundMergeRequest {
        /// MR iid / PR number
        id: u64,
    },
    /// No open merge request, creating one
    CreatingMergeRequest {
        /// Source branch
        source_branch: String,
        /// Target branch
        target_branch: String,
    },
    /// Sending the update call
    UpdatingMergeRequest {
        /// MR iid / PR number
        id: u64,
        /// Title being sent
        title: String,
    },
    /// Accepting the merge request
    AcceptingMergeRequest {
        /// MR iid / PR number
        id: u64,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pushing {
                remote,
                branch,
                force,
            } => {
                write!(f, "Pushing {branch} to {remote}")?;
                if *force {
                    write!(f, " (force)")?;
                }
                Ok(())
            }
            Self::Pushed { branch } => write!(f, "Pushed {branch}"),
            Self::FoundMergeRequest { id } => write!(f, "Found existing merge request !{id}"),
            Self::CreatingMergeRequest {
                source_branch,
                target_branch,
            } => write!(
                f,
                "Creating merge request {source_branch} -> {target_branch}"
            ),
            Self::UpdatingMergeRequest { id, title } => {
                write!(f, "Updating merge request !{id}: {title}")
            }
            Self::AcceptingMergeRequest { id } => write!(f, "Accepting merge request !{id}"),
        }
    }
}

/// Receiver of progress events
pub trait ProgressCallback: Send + Sync {
    /// Called once per workflow step, in order
    fn on_event(&self, event: &ProgressEvent);
}

/// Progress callback that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}
