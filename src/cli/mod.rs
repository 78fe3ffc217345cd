//! CLI commands and terminal rendering

pub mod push;
pub mod style;

use anstream::println;
use forge_push::progress::{ProgressCallback, ProgressEvent};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;
use style::{Stylize, arrow, check, cross, spinner_style};

/// Renders progress events to the terminal
///
/// `git push` gets a spinner; every other step is one line.
#[derive(Default)]
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a progress renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop a running spinner after a failure
    pub fn abandon(&self) {
        if let Some(spinner) = self.take_spinner() {
            spinner.finish_with_message(format!("{} {}", cross(), spinner.message()));
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl ProgressCallback for CliProgress {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Pushing { .. } => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(spinner_style());
                spinner.set_message(format!("{event}..."));
                spinner.enable_steady_tick(Duration::from_millis(80));
                if let Ok(mut guard) = self.spinner.lock() {
                    *guard = Some(spinner);
                }
            }
            ProgressEvent::Pushed { .. } => {
                if let Some(spinner) = self.take_spinner() {
                    spinner.finish_with_message(format!("{} {event}", check()));
                }
            }
            ProgressEvent::FoundMergeRequest { .. }
            | ProgressEvent::CreatingMergeRequest { .. }
            | ProgressEvent::UpdatingMergeRequest { .. }
            | ProgressEvent::AcceptingMergeRequest { .. } => {
                println!("{} {}", arrow(), event.to_string().muted());
            }
        }
    }
}
