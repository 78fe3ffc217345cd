//! Merge request reconciliation
//!
//! - `title` - WIP marker transforms (pure)
//! - `assignee` - fuzzy account matching (pure)
//! - `execute` - the find-or-create-then-update state machine (effectful)

pub mod assignee;
mod execute;
pub mod title;

pub use assignee::{did_you_mean, match_names, normalize_name, resolve_assignee};
pub use execute::reconcile;
pub use title::{WIP_PREFIX, compute_title, mark_ready, mark_wip};
