//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips colors when the terminal
//! doesn't support them, so styling here is unconditional.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Success marker
pub const CHECK: &str = "✓";

/// Failure marker
pub const CROSS: &str = "✗";

/// Styled text shortcuts
pub trait Stylize: Display + Sized {
    /// Bold
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Dimmed
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Highlighted value
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Green
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Red, bold
    fn failure(&self) -> String {
        self.red().bold().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.failure()
}

/// Dimmed arrow for step lists
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner used while waiting on git or the forge
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render `url`, as a clickable link when the terminal supports it
pub fn link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
