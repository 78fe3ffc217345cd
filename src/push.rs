//! Push orchestration
//!
//! Push the current branch, then reconcile its merge request. A failed
//! push stops the run before the forge is contacted.

use crate::error::Result;
use crate::git::{DEFAULT_REMOTE, GitRepo};
use crate::platform::{ForgeService, select_backend};
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::reconcile::reconcile;
use crate::types::{ProjectReference, ReconciliationOutcome, ReconciliationRequest, WipDirective};
use tracing::debug;

/// Default branch merge requests target
pub const DEFAULT_TARGET_BRANCH: &str = "master";

/// What the user asked for
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Branch the merge request should target
    pub target_branch: String,
    /// Title to set verbatim
    pub title: Option<String>,
    /// WIP marker handling
    pub wip_directive: WipDirective,
    /// Name fragment of the account to assign
    pub assignee: Option<String>,
    /// Accept the merge request once updated
    pub accept: bool,
    /// Force-push the branch
    pub force: bool,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            target_branch: DEFAULT_TARGET_BRANCH.to_string(),
            title: None,
            wip_directive: WipDirective::None,
            assignee: None,
            accept: false,
            force: false,
        }
    }
}

impl PushOptions {
    /// Reconciliation request for `source_branch`
    pub fn request_for(&self, source_branch: &str) -> ReconciliationRequest {
        ReconciliationRequest {
            source_branch: source_branch.to_string(),
            target_branch: self.target_branch.clone(),
            explicit_title: self.title.clone(),
            wip_directive: self.wip_directive,
            assignee_pattern: self.assignee.clone(),
            auto_accept: self.accept,
            force_push: self.force,
        }
    }
}

/// Push the current branch and reconcile its merge request
///
/// Order: read the remote URL, pick the backend and build it with
/// `connect` (no API calls), read the current branch, push, reconcile.
pub async fn push_and_reconcile<F>(
    repo: &dyn GitRepo,
    connect: F,
    options: &PushOptions,
    progress: &dyn ProgressCallback,
) -> Result<ReconciliationOutcome>
where
    F: FnOnce(&ProjectReference) -> Result<Box<dyn ForgeService>>,
{
    let remote_url = repo.remote_url(DEFAULT_REMOTE)?;
    let project = select_backend(DEFAULT_REMOTE, &remote_url)?;
    debug!(
        platform = %project.platform,
        project = %project.namespace_path,
        "selected backend"
    );
    let forge = connect(&project)?;

    let source_branch = repo.current_branch()?;

    progress.on_event(&ProgressEvent::Pushing {
        remote: DEFAULT_REMOTE.to_string(),
        branch: source_branch.clone(),
        force: options.force,
    });
    repo.push(DEFAULT_REMOTE, &source_branch, options.force)?;
    progress.on_event(&ProgressEvent::Pushed {
        branch: source_branch.clone(),
    });

    let request = options.request_for(&source_branch);
    reconcile(&request, forge.as_ref(), progress).await
}
