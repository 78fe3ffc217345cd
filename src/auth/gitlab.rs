//! GitLab token lookup

use super::{AuthConfig, resolve_token};
use crate::config::Config;
use crate::error::Result;

/// Environment variables checked for a GitLab token, in order
const GITLAB_TOKEN_VARS: &[&str] = &["GITLAB_TOKEN", "GL_TOKEN"];

/// Resolve the GitLab token from the environment or `config`
pub fn get_gitlab_auth(config: &Config) -> Result<AuthConfig> {
    get_gitlab_auth_with(config, |var| std::env::var(var).ok())
}

/// Like [`get_gitlab_auth`] with an explicit environment lookup
pub fn get_gitlab_auth_with<F>(config: &Config, env: F) -> Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_token(
        "GitLab",
        GITLAB_TOKEN_VARS,
        config.gitlab.token.as_deref(),
        env,
    )
}
