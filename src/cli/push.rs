//! Push command - push the current branch and reconcile its merge request

use crate::cli::CliProgress;
use crate::cli::style::{CHECK, Stylize, link};
use anstream::println;
use forge_push::config::load_default_config;
use forge_push::error::Result;
use forge_push::git::GitCli;
use forge_push::platform::create_forge_service;
use forge_push::push::{PushOptions, push_and_reconcile};
use std::path::Path;

/// Run the push command
pub async fn run_push(path: &Path, options: &PushOptions) -> Result<()> {
    let config = load_default_config()?;
    let repo = GitCli::new(path);
    let progress = CliProgress::new();

    let result = push_and_reconcile(
        &repo,
        |project| create_forge_service(project, &config),
        options,
        &progress,
    )
    .await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    let verb = if outcome.created { "Created" } else { "Updated" };
    println!(
        "{} {} merge request !{}: {}",
        CHECK.success(),
        verb,
        outcome.merge_request.id.accent(),
        outcome.merge_request.title.emphasis()
    );
    println!(
        "{} See merge request at {}",
        "::".success(),
        link(&outcome.merge_request.web_url)
    );

    Ok(())
}
