//! Forge service factory

use crate::auth::{get_github_auth, get_gitlab_auth};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::{ForgeService, GitHubService, GitLabService};
use crate::types::{Platform, ProjectReference};
use tracing::debug;

/// Build the backend serving `project`
///
/// Looks up the token and the API base URL, then hands both to the
/// backend constructor. No API call is made here.
pub fn create_forge_service(
    project: &ProjectReference,
    config: &Config,
) -> Result<Box<dyn ForgeService>> {
    match project.platform {
        Platform::GitLab => {
            let auth = get_gitlab_auth(config)?;
            let base_url = gitlab_base_url(project, config)?;
            debug!(%base_url, source = ?auth.source, "using GitLab backend");
            Ok(Box::new(GitLabService::new(
                auth.token,
                project.clone(),
                &base_url,
            )?))
        }
        Platform::GitHub => {
            let auth = get_github_auth(config)?;
            let api_base = github_api_base(project, config);
            debug!(api_base = ?api_base, source = ?auth.source, "using GitHub backend");
            Ok(Box::new(GitHubService::new(
                &auth.token,
                project.clone(),
                api_base.as_deref(),
            )?))
        }
    }
}

/// GitLab instance root: configured URL, else the remote's host over https
fn gitlab_base_url(project: &ProjectReference, config: &Config) -> Result<String> {
    if let Some(url) = &config.gitlab.url {
        return Ok(url.clone());
    }
    project
        .host
        .as_ref()
        .map(|host| format!("https://{host}"))
        .ok_or_else(|| {
            Error::Config(
                "cannot tell the GitLab URL from the remote; set `url` under [gitlab]".to_string(),
            )
        })
}

/// GitHub API root, `None` meaning api.github.com
fn github_api_base(project: &ProjectReference, config: &Config) -> Option<String> {
    if let Some(url) = &config.github.url {
        return Some(url.clone());
    }
    match project.host.as_deref() {
        None | Some("github.com") => None,
        Some(host) => Some(format!("https://{host}/api/v3")),
    }
}
