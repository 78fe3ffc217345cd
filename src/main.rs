//! fpush - push the current branch and open or update its merge request

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::style::Stylize;
use forge_push::push::{DEFAULT_TARGET_BRANCH, PushOptions};
use forge_push::types::WipDirective;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Push the current branch and open or update its merge request on GitLab or GitHub
#[derive(Parser, Debug)]
#[command(name = "fpush", version, about)]
struct Cli {
    /// Path to the git checkout
    #[arg(short = 'C', long, default_value = ".")]
    path: PathBuf,

    /// Branch the merge request targets
    #[arg(short, long, default_value = DEFAULT_TARGET_BRANCH)]
    target: String,

    /// Set the merge request title
    #[arg(long)]
    title: Option<String>,

    /// Mark the merge request as work in progress
    #[arg(long, conflicts_with = "ready")]
    wip: bool,

    /// Remove the work-in-progress marker
    #[arg(long)]
    ready: bool,

    /// Assign the merge request to the user whose name contains this
    #[arg(short, long)]
    assignee: Option<String>,

    /// Accept the merge request once updated
    #[arg(long)]
    accept: bool,

    /// Force-push the branch
    #[arg(short, long)]
    force: bool,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn push_options(&self) -> PushOptions {
        let wip_directive = if self.ready {
            WipDirective::MarkReady
        } else if self.wip {
            WipDirective::MarkWip
        } else {
            WipDirective::None
        };

        PushOptions {
            target_branch: self.target.clone(),
            title: self.title.clone(),
            wip_directive,
            assignee: self.assignee.clone(),
            accept: self.accept,
            force: self.force,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "forge_push=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    cli::push::run_push(&cli.path, &cli.push_options()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".failure());
            ExitCode::FAILURE
        }
    }
}
