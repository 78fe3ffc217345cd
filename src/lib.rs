//! forge-push: push a branch and open or update its merge request
//!
//! Pushes the current branch of a git checkout, then finds or creates the
//! merge request for it on GitLab or GitHub and brings its title, target
//! branch and assignee up to date.

pub mod auth;
pub mod config;
pub mod error;
pub mod git;
pub mod platform;
pub mod progress;
pub mod push;
pub mod reconcile;
pub mod types;
