//! Error types for forge-push

use crate::types::Platform;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unreadable configuration (including auth tokens)
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote URL could not be read or understood
    #[error("could not get url of '{remote}' remote: {message}")]
    RemoteResolution {
        /// Remote name (e.g. "origin")
        remote: String,
        /// What went wrong
        message: String,
    },

    /// Assignee pattern did not resolve to exactly one account
    #[error(transparent)]
    Ambiguity(#[from] AmbiguityError),

    /// GitLab API returned an error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// GitHub API returned an error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error raised by the octocrab client
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// `git push` exited unsuccessfully
    #[error("failed to push '{branch}': {message}")]
    Push {
        /// Branch that was being pushed
        branch: String,
        /// Output of the failed push
        message: String,
    },

    /// Reading repository state failed
    #[error("git error: {0}")]
    Git(String),

    /// The selected backend cannot perform this operation
    #[error("{operation} is not supported on {platform}")]
    Unsupported {
        /// Backend platform
        platform: Platform,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error came from talking to the forge
    pub const fn is_forge_communication(&self) -> bool {
        matches!(
            self,
            Self::GitLabApi(_) | Self::GitHubApi(_) | Self::Http(_) | Self::Octocrab(_)
        )
    }
}

/// Which way assignee resolution failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityKind {
    /// No account matched the pattern
    NotFound,
    /// More than one account matched the pattern
    MultipleMatches,
}

/// Assignee resolution failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmbiguityError {
    /// No account matched
    #[error("no user found matching '{pattern}'{}", did_you_mean_suffix(.suggestion.as_deref()))]
    NotFound {
        /// Pattern supplied by the user
        pattern: String,
        /// Closest display name, if any accounts exist
        suggestion: Option<String>,
    },

    /// Several accounts matched
    #[error("found several users matching '{pattern}': {}", .matches.join(", "))]
    MultipleMatches {
        /// Pattern supplied by the user
        pattern: String,
        /// Matched display names, in input order
        matches: Vec<String>,
    },
}

impl AmbiguityError {
    /// Failure kind
    pub const fn kind(&self) -> AmbiguityKind {
        match self {
            Self::NotFound { .. } => AmbiguityKind::NotFound,
            Self::MultipleMatches { .. } => AmbiguityKind::MultipleMatches,
        }
    }

    /// The pattern that failed to resolve
    pub fn pattern(&self) -> &str {
        match self {
            Self::NotFound { pattern, .. } | Self::MultipleMatches { pattern, .. } => pattern,
        }
    }
}

fn did_you_mean_suffix(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"))
}
