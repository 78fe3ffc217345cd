//! Git repository access
//!
//! Reads go through `gix`; pushing shells out to `git`, which owns
//! credential helpers and ssh configuration.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Remote that branches are pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Version control operations the push workflow needs
pub trait GitRepo: Send + Sync {
    /// URL of `remote`
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Short name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Push `branch` to the identically named branch on `remote`
    fn push(&self, remote: &str, branch: &str, force: bool) -> Result<()>;
}

/// Git checkout on disk
#[derive(Debug, Clone)]
pub struct GitCli {
    path: PathBuf,
}

impl GitCli {
    /// Use the repository containing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this repository was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<gix::Repository> {
        gix::discover(&self.path).map_err(|e| {
            Error::Git(format!(
                "{} is not inside a git repository: {e}",
                self.path.display()
            ))
        })
    }
}

/// Arguments for `git push`
pub fn push_args(remote: &str, branch: &str, force: bool) -> Vec<String> {
    let mut args = vec![
        "push".to_string(),
        "-u".to_string(),
        remote.to_string(),
        format!("{branch}:{branch}"),
    ];
    if force {
        args.push("--force".to_string());
    }
    args
}

impl GitRepo for GitCli {
    fn remote_url(&self, remote: &str) -> Result<String> {
        let resolution_error = |message: String| Error::RemoteResolution {
            remote: remote.to_string(),
            message,
        };

        let repo = self.open().map_err(|e| resolution_error(e.to_string()))?;
        let found = repo
            .find_remote(remote)
            .map_err(|e| resolution_error(e.to_string()))?;
        let url = found
            .url(gix::remote::Direction::Push)
            .or_else(|| found.url(gix::remote::Direction::Fetch))
            .ok_or_else(|| resolution_error("remote has no url".to_string()))?;

        let url = url.to_bstring().to_string();
        debug!(remote, %url, "read remote url");
        Ok(url)
    }

    fn current_branch(&self) -> Result<String> {
        let repo = self.open()?;
        let head = repo
            .head_name()
            .map_err(|e| Error::Git(format!("failed to read HEAD: {e}")))?
            .ok_or_else(|| Error::Git("HEAD is detached; check out a branch first".to_string()))?;

        let branch = head.shorten().to_string();
        debug!(%branch, "read current branch");
        Ok(branch)
    }

    fn push(&self, remote: &str, branch: &str, force: bool) -> Result<()> {
        let args = push_args(remote, branch, force);
        debug!(?args, "running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.path)
            .output()
            .map_err(|e| Error::Push {
                branch: branch.to_string(),
                message: format!("failed to run git: {e}"),
            })?;

        if !output.status.success() {
            return Err(Error::Push {
                branch: branch.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("git should be installed");
        assert!(
            status.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&status.stderr)
        );
    }

    fn init_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        git(temp.path(), &["init", "-q", "-b", "feature"]);
        git(temp.path(), &["config", "user.email", "test@test.com"]);
        git(temp.path(), &["config", "user.name", "Test User"]);
        git(
            temp.path(),
            &["commit", "-q", "--allow-empty", "-m", "initial"],
        );
        temp
    }

    #[test]
    fn test_push_args() {
        assert_eq!(
            push_args("origin", "feat", false),
            vec!["push", "-u", "origin", "feat:feat"]
        );
        assert_eq!(
            push_args("origin", "feat", true),
            vec!["push", "-u", "origin", "feat:feat", "--force"]
        );
    }

    #[test]
    fn test_reads_remote_url_and_branch() {
        let temp = init_repo();
        git(
            temp.path(),
            &["remote", "add", "origin", "git@example.com:foo/bar.git"],
        );

        let repo = GitCli::new(temp.path());
        assert_eq!(
            repo.remote_url("origin").unwrap(),
            "git@example.com:foo/bar.git"
        );
        assert_eq!(repo.current_branch().unwrap(), "feature");
    }

    #[test]
    fn test_missing_remote_is_resolution_error() {
        let temp = init_repo();
        let repo = GitCli::new(temp.path());
        assert!(matches!(
            repo.remote_url("origin"),
            Err(Error::RemoteResolution { .. })
        ));
    }

    #[test]
    fn test_push_to_bare_remote() {
        let remote = TempDir::new().unwrap();
        git(remote.path(), &["init", "-q", "--bare"]);
        let temp = init_repo();
        let remote_path = remote.path().to_str().unwrap();
        git(temp.path(), &["remote", "add", "origin", remote_path]);

        GitCli::new(temp.path())
            .push("origin", "feature", false)
            .unwrap();
        git(remote.path(), &["rev-parse", "--verify", "refs/heads/feature"]);
    }

    #[test]
    fn test_failed_push_is_push_error() {
        let temp = init_repo();
        git(
            temp.path(),
            &["remote", "add", "origin", "/nonexistent/remote.git"],
        );

        match GitCli::new(temp.path()).push("origin", "feature", false) {
            Err(Error::Push { branch, .. }) => assert_eq!(branch, "feature"),
            other => panic!("expected Push error, got {other:?}"),
        }
    }
}
