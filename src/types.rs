//! Core types for forge-push

use serde::{Deserialize, Serialize};

/// Detected forge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GitHub => write!(f, "GitHub"),
            Self::GitLab => write!(f, "GitLab"),
        }
    }
}

/// Project on a forge, derived once from a remote URL
///
/// `namespace_path` never has a leading or trailing slash and never ends
/// with `.git`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    /// Which forge hosts the project
    pub platform: Platform,
    /// Host parsed from the remote URL, if it had one
    pub host: Option<String>,
    /// `group/project` path
    pub namespace_path: String,
}

impl ProjectReference {
    /// Owning namespace (everything before the last `/`)
    pub fn owner(&self) -> &str {
        self.namespace_path
            .rsplit_once('/')
            .map_or("", |(owner, _)| owner)
    }

    /// Project name (everything after the last `/`)
    pub fn repo(&self) -> &str {
        self.namespace_path
            .rsplit_once('/')
            .map_or(self.namespace_path.as_str(), |(_, repo)| repo)
    }
}

/// Opaque forge-side project identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(pub String);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A merge request / pull request
///
/// This is a read copy; the forge owns the real thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// MR iid (GitLab) or PR number (GitHub)
    pub id: u64,
    /// Title
    pub title: String,
    /// Branch being merged
    pub source_branch: String,
    /// Branch merged into
    pub target_branch: String,
    /// Web URL
    pub web_url: String,
}

/// A forge user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric user id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Human-readable name, used for matching
    pub display_name: String,
}

/// What to do with the WIP marker of the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WipDirective {
    /// Leave the marker alone
    #[default]
    None,
    /// Add the marker
    MarkWip,
    /// Remove the marker
    MarkReady,
}

/// Caller intent for one reconciliation run
#[derive(Debug, Clone, Default)]
pub struct ReconciliationRequest {
    /// Branch the MR merges from
    pub source_branch: String,
    /// Branch the MR merges into
    pub target_branch: String,
    /// Title to set verbatim, overriding any WIP directive
    pub explicit_title: Option<String>,
    /// WIP marker handling
    pub wip_directive: WipDirective,
    /// Name fragment of the account to assign
    pub assignee_pattern: Option<String>,
    /// Accept (merge) the MR after updating it
    pub auto_accept: bool,
    /// Whether the branch was force-pushed
    pub force_push: bool,
}

/// Fields sent by the single update call of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequestUpdate {
    /// New title (always sent)
    pub title: String,
    /// New target branch (always sent)
    pub target_branch: String,
    /// Account to assign, if any
    pub assignee: Option<Account>,
    /// Delete the source branch once merged
    pub remove_source_branch: bool,
}

/// Result of a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconciliationOutcome {
    /// Latest known state of the MR
    pub merge_request: MergeRequest,
    /// Whether this run created the MR
    pub created: bool,
}
