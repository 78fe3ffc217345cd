//! GitLab forge service implementation

use crate::error::{Error, Result};
use crate::platform::ForgeService;
use crate::types::{
    Account, MergeRequest, MergeRequestUpdate, Platform, ProjectId, ProjectReference,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    base_url: String,
    project: ProjectReference,
    project_id: OnceCell<ProjectId>,
}

#[derive(Deserialize)]
struct GlProject {
    id: u64,
}

#[derive(Deserialize)]
struct GlMergeRequest {
    iid: u64,
    web_url: String,
    source_branch: String,
    target_branch: String,
    title: String,
}

#[derive(Deserialize)]
struct GlUser {
    id: u64,
    username: String,
    name: String,
}

impl From<GlMergeRequest> for MergeRequest {
    fn from(mr: GlMergeRequest) -> Self {
        Self {
            id: mr.iid,
            title: mr.title,
            source_branch: mr.source_branch,
            target_branch: mr.target_branch,
            web_url: mr.web_url,
        }
    }
}

impl From<GlUser> for Account {
    fn from(user: GlUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.name,
        }
    }
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct UpdateMrPayload<'a> {
    title: &'a str,
    target_branch: &'a str,
    remove_source_branch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<u64>,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Users fetched per page when listing accounts
const USERS_PER_PAGE: &str = "100";

impl GitLabService {
    /// Create a new GitLab service
    ///
    /// `base_url` is the instance root, e.g. `https://gitlab.com`; the
    /// `/api/v4` suffix is added here.
    pub fn new(token: String, project: ProjectReference, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            project: ProjectReference {
                platform: Platform::GitLab,
                ..project
            },
            project_id: OnceCell::new(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    fn encoded_project(&self) -> String {
        urlencoding::encode(&self.project.namespace_path).into_owned()
    }

    async fn fetch_project_id(&self) -> Result<ProjectId> {
        debug!(project = %self.project.namespace_path, "resolving project id");
        let url = self.api_url(&format!("/projects/{}", self.encoded_project()));

        let project: GlProject = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                Error::GitLabApi(format!(
                    "could not resolve project {}: {e}",
                    self.project.namespace_path
                ))
            })?
            .json()
            .await?;

        debug!(project_id = project.id, "resolved project id");
        Ok(ProjectId(project.id.to_string()))
    }
}

#[async_trait]
impl ForgeService for GitLabService {
    async fn resolve_project_id(&self) -> Result<ProjectId> {
        self.project_id
            .get_or_try_init(|| self.fetch_project_id())
            .await
            .cloned()
    }

    async fn find_open_merge_request(
        &self,
        project_id: &ProjectId,
        source_branch: &str,
    ) -> Result<Option<MergeRequest>> {
        debug!(source_branch, "finding open MR");
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests"));

        let mrs: Vec<GlMergeRequest> = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(&[("source_branch", source_branch), ("state", "opened")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        let result: Option<MergeRequest> = mrs.into_iter().next().map(Into::into);
        if let Some(ref mr) = result {
            debug!(mr_iid = mr.id, "found open MR");
        } else {
            debug!("no open MR found");
        }
        Ok(result)
    }

    async fn create_merge_request(
        &self,
        project_id: &ProjectId,
        source_branch: &str,
        title: &str,
        target_branch: &str,
    ) -> Result<MergeRequest> {
        debug!(source_branch, target_branch, "creating MR");
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests"));

        let payload = CreateMrPayload {
            source_branch,
            target_branch,
            title,
        };

        let mr: GlMergeRequest = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        let mr: MergeRequest = mr.into();
        debug!(mr_iid = mr.id, "created MR");
        Ok(mr)
    }

    async fn update_merge_request(
        &self,
        project_id: &ProjectId,
        merge_request: &MergeRequest,
        update: &MergeRequestUpdate,
    ) -> Result<MergeRequest> {
        debug!(mr_iid = merge_request.id, title = %update.title, "updating MR");
        let url = self.api_url(&format!(
            "/projects/{project_id}/merge_requests/{}",
            merge_request.id
        ));

        let payload = UpdateMrPayload {
            title: &update.title,
            target_branch: &update.target_branch,
            remove_source_branch: update.remove_source_branch,
            assignee_id: update.assignee.as_ref().map(|a| a.id),
        };

        let mr: GlMergeRequest = self
            .client
            .put(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        debug!(mr_iid = merge_request.id, "updated MR");
        Ok(mr.into())
    }

    async fn accept_merge_request(
        &self,
        project_id: &ProjectId,
        merge_request: &MergeRequest,
    ) -> Result<()> {
        debug!(mr_iid = merge_request.id, "accepting MR");
        let url = self.api_url(&format!(
            "/projects/{project_id}/merge_requests/{}/merge",
            merge_request.id
        ));

        self.client
            .put(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&serde_json::json!({ "merge_when_pipeline_succeeds": true }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(format!("accept failed: {e}")))?;

        debug!(mr_iid = merge_request.id, "accepted MR");
        Ok(())
    }

    async fn list_active_accounts(&self) -> Result<Vec<Account>> {
        debug!("listing active users");
        let url = self.api_url("/users");

        let mut accounts = Vec::new();
        let mut page = Some("1".to_string());
        while let Some(current) = page {
            let response = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .query(&[
                    ("active", "true"),
                    ("per_page", USERS_PER_PAGE),
                    ("page", current.as_str()),
                ])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| Error::GitLabApi(e.to_string()))?;

            // GitLab leaves x-next-page empty on the last page
            page = response
                .headers()
                .get("x-next-page")
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(ToString::to_string);

            let users: Vec<GlUser> = response.json().await?;
            accounts.extend(users.into_iter().map(Account::from));
        }

        debug!(count = accounts.len(), "listed active users");
        Ok(accounts)
    }

    fn project(&self) -> &ProjectReference {
        &self.project
    }
}
