//! WIP marker handling for merge request titles
//!
//! Pure functions, no I/O. All prefix checks are exact and case-sensitive;
//! surrounding whitespace is never trimmed.

use crate::types::WipDirective;

/// Title prefix marking a merge request as work in progress
pub const WIP_PREFIX: &str = "WIP: ";

/// Prepend the WIP marker unless it is already there
pub fn mark_wip(title: &str) -> String {
    if title.starts_with(WIP_PREFIX) {
        title.to_string()
    } else {
        format!("{WIP_PREFIX}{title}")
    }
}

/// Strip one leading WIP marker, if present
pub fn mark_ready(title: &str) -> String {
    title.strip_prefix(WIP_PREFIX).unwrap_or(title).to_string()
}

/// Compute the title to send with the update call
///
/// Precedence: an explicit title wins, then `MarkReady`, then `MarkWip`.
/// An empty explicit title counts as no title. With no directive the
/// current title is passed through unchanged, since the update call always
/// carries a title.
pub fn compute_title(current: &str, explicit: Option<&str>, directive: WipDirective) -> String {
    if let Some(title) = explicit.filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    match directive {
        WipDirective::MarkReady => mark_ready(current),
        WipDirective::MarkWip => mark_wip(current),
        WipDirective::None => current.to_string(),
    }
}
