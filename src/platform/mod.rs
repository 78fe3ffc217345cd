//! Forge services for GitHub and GitLab
//!
//! Provides a unified interface for merge request operations across forges.

mod detection;
mod factory;
mod github;
mod gitlab;

pub use detection::{detect_platform, host_from_url, project_name_from_url, select_backend};
pub use factory::create_forge_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{Account, MergeRequest, MergeRequestUpdate, ProjectId, ProjectReference};
use async_trait::async_trait;

/// Forge service trait for merge request operations
///
/// This trait abstracts GitHub and GitLab operations, allowing the same
/// reconciliation logic to work with either forge. A backend that cannot
/// perform an operation must return [`crate::error::Error::Unsupported`]
/// rather than pretend it succeeded.
#[async_trait]
pub trait ForgeService: Send + Sync {
    /// Resolve the forge-side id of this service's project
    ///
    /// Memoized: the API is queried at most once per service instance.
    async fn resolve_project_id(&self) -> Result<ProjectId>;

    /// Find the open merge request whose source is `source_branch`
    async fn find_open_merge_request(
        &self,
        project_id: &ProjectId,
        source_branch: &str,
    ) -> Result<Option<MergeRequest>>;

    /// Create a merge request
    async fn create_merge_request(
        &self,
        project_id: &ProjectId,
        source_branch: &str,
        title: &str,
        target_branch: &str,
    ) -> Result<MergeRequest>;

    /// Apply `update` to an existing merge request, returning its new state
    ///
    /// Must be safe to call repeatedly with the same arguments.
    async fn update_merge_request(
        &self,
        project_id: &ProjectId,
        merge_request: &MergeRequest,
        update: &MergeRequestUpdate,
    ) -> Result<MergeRequest>;

    /// Accept (merge) a merge request
    async fn accept_merge_request(
        &self,
        project_id: &ProjectId,
        merge_request: &MergeRequest,
    ) -> Result<()>;

    /// Accounts that can be assigned
    async fn list_active_accounts(&self) -> Result<Vec<Account>>;

    /// The project this service operates on
    fn project(&self) -> &ProjectReference;
}
