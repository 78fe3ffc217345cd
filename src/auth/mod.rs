//! Authentication for GitHub and GitLab
//!
//! Tokens come from environment variables first, then the config file.

mod github;
mod gitlab;

pub use github::{get_github_auth, get_github_auth_with};
pub use gitlab::{get_gitlab_auth, get_gitlab_auth_with};

use crate::error::{Error, Result};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from the config file
    ConfigFile,
}

/// A resolved access token
#[derive(Clone)]
pub struct AuthConfig {
    /// The token itself
    pub token: String,
    /// Where it came from
    pub source: AuthSource,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// First non-empty token among `env_vars`, then `config_token`
fn resolve_token<F>(
    forge: &str,
    env_vars: &[&str],
    config_token: Option<&str>,
    env: F,
) -> Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = env_vars
        .iter()
        .filter_map(|var| env(*var))
        .find(|t| !t.trim().is_empty())
    {
        return Ok(AuthConfig {
            token: token.trim().to_string(),
            source: AuthSource::EnvVar,
        });
    }

    config_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| AuthConfig {
            token: t.to_string(),
            source: AuthSource::ConfigFile,
        })
        .ok_or_else(|| {
            Error::Config(format!(
                "no {forge} token found: set {} or add `token` under [{}] in the config file",
                env_vars.join(" or "),
                forge.to_lowercase()
            ))
        })
}
