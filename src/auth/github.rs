//! GitHub token lookup

use super::{AuthConfig, resolve_token};
use crate::config::Config;
use crate::error::Result;

/// Environment variables checked for a GitHub token, in order
const GITHUB_TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolve the GitHub token from the environment or `config`
pub fn get_github_auth(config: &Config) -> Result<AuthConfig> {
    get_github_auth_with(config, |var| std::env::var(var).ok())
}

/// Like [`get_github_auth`] with an explicit environment lookup
pub fn get_github_auth_with<F>(config: &Config, env: F) -> Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_token(
        "GitHub",
        GITHUB_TOKEN_VARS,
        config.github.token.as_deref(),
        env,
    )
}
