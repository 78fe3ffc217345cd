//! Merge request reconciliation - effectful operations
//!
//! Find-or-create the merge request for a branch pair, then send one
//! unconditional update and optionally accept it. Every call is awaited in
//! order and nothing is retried.

use crate::error::Result;
use crate::platform::ForgeService;
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::reconcile::assignee::resolve_assignee;
use crate::reconcile::title::compute_title;
use crate::types::{
    Account, MergeRequest, MergeRequestUpdate, ProjectId, ReconciliationOutcome,
    ReconciliationRequest,
};
use tracing::debug;

/// Reconcile the merge request described by `request` (EFFECTFUL)
///
/// 1. Resolve the project id
/// 2. Find an open MR for the source branch, or create one titled after it
/// 3. Resolve the assignee pattern, if any
/// 4. Send exactly one update with title, target branch and assignee
/// 5. Accept, if requested
///
/// The update is sent even when nothing changed. Creation is attempted at
/// most once and never re-checked.
pub async fn reconcile(
    request: &ReconciliationRequest,
    forge: &dyn ForgeService,
    progress: &dyn ProgressCallback,
) -> Result<ReconciliationOutcome> {
    let project_id = forge.resolve_project_id().await?;
    debug!(
        %project_id,
        source = %request.source_branch,
        target = %request.target_branch,
        "reconciling merge request"
    );

    let (merge_request, created) =
        ensure_merge_request(request, forge, &project_id, progress).await?;

    let assignee = find_assignee(request.assignee_pattern.as_deref(), forge).await?;

    let update = MergeRequestUpdate {
        title: compute_title(
            &merge_request.title,
            request.explicit_title.as_deref(),
            request.wip_directive,
        ),
        target_branch: request.target_branch.clone(),
        assignee,
        remove_source_branch: true,
    };

    progress.on_event(&ProgressEvent::UpdatingMergeRequest {
        id: merge_request.id,
        title: update.title.clone(),
    });
    let merge_request = forge
        .update_merge_request(&project_id, &merge_request, &update)
        .await?;

    if request.auto_accept {
        progress.on_event(&ProgressEvent::AcceptingMergeRequest {
            id: merge_request.id,
        });
        forge
            .accept_merge_request(&project_id, &merge_request)
            .await?;
    }

    Ok(ReconciliationOutcome {
        merge_request,
        created,
    })
}

async fn ensure_merge_request(
    request: &ReconciliationRequest,
    forge: &dyn ForgeService,
    project_id: &ProjectId,
    progress: &dyn ProgressCallback,
) -> Result<(MergeRequest, bool)> {
    if let Some(existing) = forge
        .find_open_merge_request(project_id, &request.source_branch)
        .await?
    {
        progress.on_event(&ProgressEvent::FoundMergeRequest { id: existing.id });
        return Ok((existing, false));
    }

    progress.on_event(&ProgressEvent::CreatingMergeRequest {
        source_branch: request.source_branch.clone(),
        target_branch: request.target_branch.clone(),
    });
    let created = forge
        .create_merge_request(
            project_id,
            &request.source_branch,
            &request.source_branch,
            &request.target_branch,
        )
        .await?;
    Ok((created, true))
}

async fn find_assignee(
    pattern: Option<&str>,
    forge: &dyn ForgeService,
) -> Result<Option<Account>> {
    // Empty pattern means "no assignee", same as none at all
    let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let accounts = forge.list_active_accounts().await?;
    let account = resolve_assignee(pattern, &accounts)?;
    debug!(pattern, username = %account.username, "resolved assignee");
    Ok(Some(account))
}
