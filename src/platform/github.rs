//! GitHub forge service implementation

use crate::error::{Error, Result};
use crate::platform::ForgeService;
use crate::types::{
    Account, MergeRequest, MergeRequestUpdate, Platform, ProjectId, ProjectReference,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::OnceCell;
use tracing::debug;

/// Public GitHub REST endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Collaborators fetched per page when listing accounts
const COLLABORATORS_PER_PAGE: usize = 100;

/// GitHub service using octocrab
///
/// Pull request calls go through octocrab; collaborators, assignees and
/// branch deletion use raw REST requests.
pub struct GitHubService {
    client: Octocrab,
    project: ProjectReference,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// REST root for raw requests, without trailing slash
    api_base: String,
    project_id: OnceCell<ProjectId>,
    /// Set by an update asking to remove the source branch; honoured on accept
    delete_head_on_accept: AtomicBool,
}

#[derive(Deserialize)]
struct Collaborator {
    id: u64,
    login: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_base` defaults to [`DEFAULT_API_BASE`]; pass
    /// `https://<host>/api/v3` for GitHub Enterprise.
    pub fn new(token: &str, project: ProjectReference, api_base: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = match api_base {
            Some(base) => {
                let base = base.trim_end_matches('/');
                builder = builder
                    .base_uri(base)
                    .map_err(|e| Error::GitHubApi(e.to_string()))?;
                base.to_string()
            }
            None => DEFAULT_API_BASE.to_string(),
        };

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("forge-push/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            project: ProjectReference {
                platform: Platform::GitHub,
                ..project
            },
            token: token.to_string(),
            http_client,
            api_base,
            project_id: OnceCell::new(),
            delete_head_on_accept: AtomicBool::new(false),
        })
    }

    fn raw(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}{path}", self.api_base))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn repo_path(&self) -> String {
        format!("/repos/{}/{}", self.project.owner(), self.project.repo())
    }

    async fn fetch_project_id(&self) -> Result<ProjectId> {
        debug!(project = %self.project.namespace_path, "resolving repository id");
        let repo = self
            .client
            .repos(self.project.owner(), self.project.repo())
            .get()
            .await
            .map_err(|e| {
                Error::GitHubApi(format!(
                    "could not resolve repository {}: {e}",
                    self.project.namespace_path
                ))
            })?;
        Ok(ProjectId(repo.id.0.to_string()))
    }

    async fn add_assignee(&self, number: u64, username: &str) -> Result<()> {
        debug!(pr_number = number, username, "assigning PR");
        self.raw(
            Method::POST,
            &format!("{}/issues/{number}/assignees", self.repo_path()),
        )
        .json(&serde_json::json!({ "assignees": [username] }))
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::GitHubApi(format!("failed to assign {username}: {e}")))?;
        Ok(())
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "deleting merged branch");
        self.raw(
            Method::DELETE,
            &format!("{}/git/refs/heads/{}", self.repo_path(), encode_ref(branch)),
        )
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::GitHubApi(format!("failed to delete branch {branch}: {e}")))?;
        Ok(())
    }
}

/// Percent-encode each segment of a ref name, keeping `/` separators
fn encode_ref(name: &str) -> String {
    name.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Helper to convert octocrab PR to our `MergeRequest` type
fn mr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> MergeRequest {
    MergeRequest {
        id: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        source_branch: pr.head.ref_field.clone(),
        target_branch: pr.base.ref_field.clone(),
        web_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl ForgeService for GitHubService {
    async fn resolve_project_id(&self) -> Result<ProjectId> {
        self.project_id
            .get_or_try_init(|| self.fetch_project_id())
            .await
            .cloned()
    }

    async fn find_open_merge_request(
        &self,
        _project_id: &ProjectId,
        source_branch: &str,
    ) -> Result<Option<MergeRequest>> {
        debug!(source_branch, "finding open PR");
        let head = format!("{}:{}", self.project.owner(), source_branch);

        let prs = self
            .client
            .pulls(self.project.owner(), self.project.repo())
            .list()
            .head(head)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        let result = prs.items.first().map(mr_from_octocrab);
        if let Some(ref mr) = result {
            debug!(pr_number = mr.id, "found open PR");
        } else {
            debug!("no open PR found");
        }
        Ok(result)
    }

    async fn create_merge_request(
        &self,
        _project_id: &ProjectId,
        source_branch: &str,
        title: &str,
        target_branch: &str,
    ) -> Result<MergeRequest> {
        debug!(source_branch, target_branch, "creating PR");
        let pr = self
            .client
            .pulls(self.project.owner(), self.project.repo())
            .create(title, source_branch, target_branch)
            .send()
            .await?;

        let result = mr_from_octocrab(&pr);
        debug!(pr_number = result.id, "created PR");
        Ok(result)
    }

    async fn update_merge_request(
        &self,
        _project_id: &ProjectId,
        merge_request: &MergeRequest,
        update: &MergeRequestUpdate,
    ) -> Result<MergeRequest> {
        debug!(pr_number = merge_request.id, title = %update.title, "updating PR");
        let pr = self
            .client
            .pulls(self.project.owner(), self.project.repo())
            .update(merge_request.id)
            .title(update.title.as_str())
            .base(update.target_branch.as_str())
            .send()
            .await?;

        if let Some(assignee) = &update.assignee {
            self.add_assignee(merge_request.id, &assignee.username)
                .await?;
        }

        // GitHub has no per-PR "remove source branch" flag
        self.delete_head_on_accept
            .store(update.remove_source_branch, Ordering::Relaxed);

        debug!(pr_number = merge_request.id, "updated PR");
        Ok(mr_from_octocrab(&pr))
    }

    async fn accept_merge_request(
        &self,
        _project_id: &ProjectId,
        merge_request: &MergeRequest,
    ) -> Result<()> {
        debug!(pr_number = merge_request.id, "merging PR");
        let result = self
            .client
            .pulls(self.project.owner(), self.project.repo())
            .merge(merge_request.id)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        if !result.merged {
            return Err(Error::GitHubApi(format!(
                "PR #{} was not merged: {}",
                merge_request.id,
                result.message.unwrap_or_default()
            )));
        }

        if self.delete_head_on_accept.load(Ordering::Relaxed) {
            self.delete_branch(&merge_request.source_branch).await?;
        }

        debug!(pr_number = merge_request.id, sha = ?result.sha, "merge complete");
        Ok(())
    }

    async fn list_active_accounts(&self) -> Result<Vec<Account>> {
        debug!("listing collaborators");
        let path = format!("{}/collaborators", self.repo_path());
        let per_page = COLLABORATORS_PER_PAGE.to_string();

        let mut accounts = Vec::new();
        for page in 1_u32.. {
            let page = page.to_string();
            let batch: Vec<Collaborator> = self
                .raw(Method::GET, &path)
                .query(&[("per_page", per_page.as_str()), ("page", page.as_str())])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| Error::GitHubApi(format!("failed to list collaborators: {e}")))?
                .json()
                .await?;

            let last_page = batch.len() < COLLABORATORS_PER_PAGE;
            // The collaborators endpoint has no display names, only logins
            accounts.extend(batch.into_iter().map(|c| Account {
                id: c.id,
                display_name: c.login.clone(),
                username: c.login,
            }));
            if last_page {
                break;
            }
        }

        debug!(count = accounts.len(), "listed collaborators");
        Ok(accounts)
    }

    fn project(&self) -> &ProjectReference {
        &self.project
    }
}
