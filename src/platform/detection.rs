//! Forge detection from remote URLs

use crate::error::{Error, Result};
use crate::types::{Platform, ProjectReference};
use url::Url;

/// Detect the forge from a remote URL
///
/// Anything mentioning "github" is GitHub; everything else falls back to
/// GitLab.
pub fn detect_platform(url: &str) -> Platform {
    if url.contains("github") {
        Platform::GitHub
    } else {
        Platform::GitLab
    }
}

/// `group/project` path of a remote URL
///
/// Splits on `:` and `/`, keeps the last two segments and drops a trailing
/// `.git`, so SCP-style and URL-style remotes give the same answer.
pub fn project_name_from_url(url: &str) -> String {
    let parts: Vec<&str> = url.split([':', '/']).collect();
    let tail = &parts[parts.len().saturating_sub(2)..];
    let joined = tail.join("/");
    joined.strip_suffix(".git").unwrap_or(&joined).to_string()
}

/// Host part of a remote URL
///
/// Handles `scheme://[user@]host[:port]/path` and SCP-style
/// `[user@]host:path`. Local paths have no host.
pub fn host_from_url(url: &str) -> Option<String> {
    if url.contains("://") {
        return Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string));
    }
    let (before_colon, _) = url.split_once(':')?;
    if before_colon.contains('/') {
        // ./some:path is a local path, not SCP syntax
        return None;
    }
    let host = before_colon
        .rsplit_once('@')
        .map_or(before_colon, |(_, host)| host);
    (!host.is_empty()).then(|| host.to_string())
}

/// Decide which backend serves `remote_url` and which project it names
///
/// `remote` is the name the URL was read from, used in errors.
pub fn select_backend(remote: &str, remote_url: &str) -> Result<ProjectReference> {
    let trimmed = remote_url.trim().trim_end_matches('/');
    let namespace_path = project_name_from_url(trimmed);

    let well_formed = namespace_path
        .split_once('/')
        .is_some_and(|(owner, repo)| !owner.is_empty() && !repo.is_empty());
    if !well_formed {
        return Err(Error::RemoteResolution {
            remote: remote.to_string(),
            message: format!("cannot derive a group/project path from '{remote_url}'"),
        });
    }

    Ok(ProjectReference {
        platform: detect_platform(trimmed),
        host: host_from_url(trimmed),
        namespace_path,
    })
}
