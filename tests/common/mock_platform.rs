//! Mock forge service and git repository for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use forge_push::error::{Error, Result};
use forge_push::git::GitRepo;
use forge_push::platform::ForgeService;
use forge_push::progress::{ProgressCallback, ProgressEvent};
use forge_push::types::{
    Account, MergeRequest, MergeRequestUpdate, ProjectId, ProjectReference,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered record of calls across the git and forge mocks
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Call record for `create_merge_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMrCall {
    pub project_id: ProjectId,
    pub source_branch: String,
    pub title: String,
    pub target_branch: String,
}

/// Call record for `update_merge_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMrCall {
    pub mr_id: u64,
    pub update: MergeRequestUpdate,
}

#[derive(Default)]
struct MockState {
    open_mrs: HashMap<String, MergeRequest>,
    accounts: Vec<Account>,
    // Call tracking
    resolve_calls: usize,
    find_calls: Vec<String>,
    create_calls: Vec<CreateMrCall>,
    update_calls: Vec<UpdateMrCall>,
    accept_calls: Vec<u64>,
    list_accounts_calls: usize,
    // Error injection
    error_on_resolve: Option<String>,
    error_on_find: Option<String>,
    error_on_create: Option<String>,
    error_on_update: Option<String>,
    error_on_accept: Option<String>,
    accept_unsupported: bool,
}

/// Simple mock forge service for testing
///
/// Cloning shares state, so a test can hand one clone to the code under
/// test and inspect calls through another.
///
/// Features:
/// - Auto-incrementing MR ids
/// - Call tracking for verification
/// - Open MRs keyed by source branch
/// - Error injection for failure path testing
#[derive(Clone)]
pub struct MockForgeService {
    project: ProjectReference,
    project_id: ProjectId,
    next_mr_id: Arc<AtomicU64>,
    state: Arc<Mutex<MockState>>,
    log: CallLog,
}

impl MockForgeService {
    /// Create a new mock for `project`
    pub fn new(project: ProjectReference) -> Self {
        Self::with_log(project, CallLog::default())
    }

    /// Create a new mock recording into a shared call log
    pub fn with_log(project: ProjectReference, log: CallLog) -> Self {
        Self {
            project,
            project_id: ProjectId("42".to_string()),
            next_mr_id: Arc::new(AtomicU64::new(1)),
            state: Arc::new(Mutex::new(MockState::default())),
            log,
        }
    }

    fn record(&self, call: &str) {
        self.log.lock().unwrap().push(call.to_string());
    }

    fn injected(slot: &Option<String>) -> Result<()> {
        slot.as_ref()
            .map_or(Ok(()), |msg| Err(Error::GitLabApi(msg.clone())))
    }

    // === Setup ===

    /// Register an open MR for its source branch
    pub fn add_open_mr(&self, mr: MergeRequest) {
        self.state
            .lock()
            .unwrap()
            .open_mrs
            .insert(mr.source_branch.clone(), mr);
    }

    /// Set the accounts returned by `list_active_accounts`
    pub fn set_accounts(&self, accounts: Vec<Account>) {
        self.state.lock().unwrap().accounts = accounts;
    }

    // === Error injection methods ===

    /// Make `resolve_project_id` return an error
    pub fn fail_resolve(&self, msg: &str) {
        self.state.lock().unwrap().error_on_resolve = Some(msg.to_string());
    }

    /// Make `find_open_merge_request` return an error
    pub fn fail_find(&self, msg: &str) {
        self.state.lock().unwrap().error_on_find = Some(msg.to_string());
    }

    /// Make `create_merge_request` return an error
    pub fn fail_create(&self, msg: &str) {
        self.state.lock().unwrap().error_on_create = Some(msg.to_string());
    }

    /// Make `update_merge_request` return an error
    pub fn fail_update(&self, msg: &str) {
        self.state.lock().unwrap().error_on_update = Some(msg.to_string());
    }

    /// Make `accept_merge_request` return an error
    pub fn fail_accept(&self, msg: &str) {
        self.state.lock().unwrap().error_on_accept = Some(msg.to_string());
    }

    /// Make `accept_merge_request` report the operation as unsupported
    pub fn reject_accept_as_unsupported(&self) {
        self.state.lock().unwrap().accept_unsupported = true;
    }

    // === Call inspection ===

    pub fn resolve_calls(&self) -> usize {
        self.state.lock().unwrap().resolve_calls
    }

    pub fn find_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().find_calls.clone()
    }

    pub fn create_calls(&self) -> Vec<CreateMrCall> {
        self.state.lock().unwrap().create_calls.clone()
    }

    pub fn update_calls(&self) -> Vec<UpdateMrCall> {
        self.state.lock().unwrap().update_calls.clone()
    }

    pub fn accept_calls(&self) -> Vec<u64> {
        self.state.lock().unwrap().accept_calls.clone()
    }

    pub fn list_accounts_calls(&self) -> usize {
        self.state.lock().unwrap().list_accounts_calls
    }

    /// Box a clone for code that takes ownership of the service
    pub fn boxed(&self) -> Box<dyn ForgeService> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl ForgeService for MockForgeService {
    async fn resolve_project_id(&self) -> Result<ProjectId> {
        self.record("resolve_project_id");
        let mut state = self.state.lock().unwrap();
        state.resolve_calls += 1;
        Self::injected(&state.error_on_resolve)?;
        Ok(self.project_id.clone())
    }

    async fn find_open_merge_request(
        &self,
        _project_id: &ProjectId,
        source_branch: &str,
    ) -> Result<Option<MergeRequest>> {
        self.record("find_open_merge_request");
        let mut state = self.state.lock().unwrap();
        state.find_calls.push(source_branch.to_string());
        Self::injected(&state.error_on_find)?;
        Ok(state.open_mrs.get(source_branch).cloned())
    }

    async fn create_merge_request(
        &self,
        project_id: &ProjectId,
        source_branch: &str,
        title: &str,
        target_branch: &str,
    ) -> Result<MergeRequest> {
        self.record("create_merge_request");
        let mut state = self.state.lock().unwrap();
        state.create_calls.push(CreateMrCall {
            project_id: project_id.clone(),
            source_branch: source_branch.to_string(),
            title: title.to_string(),
            target_branch: target_branch.to_string(),
        });
        Self::injected(&state.error_on_create)?;

        let id = self.next_mr_id.fetch_add(1, Ordering::SeqCst);
        let mr = make_mr(id, source_branch, target_branch, title);
        state.open_mrs.insert(source_branch.to_string(), mr.clone());
        Ok(mr)
    }

    async fn update_merge_request(
        &self,
        _project_id: &ProjectId,
        merge_request: &MergeRequest,
        update: &MergeRequestUpdate,
    ) -> Result<MergeRequest> {
        self.record("update_merge_request");
        let mut state = self.state.lock().unwrap();
        state.update_calls.push(UpdateMrCall {
            mr_id: merge_request.id,
            update: update.clone(),
        });
        Self::injected(&state.error_on_update)?;

        let updated = MergeRequest {
            title: update.title.clone(),
            target_branch: update.target_branch.clone(),
            ..merge_request.clone()
        };
        state
            .open_mrs
            .insert(updated.source_branch.clone(), updated.clone());
        Ok(updated)
    }

    async fn accept_merge_request(
        &self,
        _project_id: &ProjectId,
        merge_request: &MergeRequest,
    ) -> Result<()> {
        self.record("accept_merge_request");
        let mut state = self.state.lock().unwrap();
        state.accept_calls.push(merge_request.id);
        if state.accept_unsupported {
            return Err(Error::Unsupported {
                platform: self.project.platform,
                operation: "accept_merge_request",
            });
        }
        Self::injected(&state.error_on_accept)
    }

    async fn list_active_accounts(&self) -> Result<Vec<Account>> {
        self.record("list_active_accounts");
        let mut state = self.state.lock().unwrap();
        state.list_accounts_calls += 1;
        Ok(state.accounts.clone())
    }

    fn project(&self) -> &ProjectReference {
        &self.project
    }
}

/// Mock git checkout
pub struct MockGitRepo {
    remote_url: Option<String>,
    branch: String,
    push_error: Option<String>,
    push_calls: Mutex<Vec<(String, String, bool)>>,
    log: CallLog,
}

impl MockGitRepo {
    /// Checkout on `branch` whose origin points at `remote_url`
    pub fn new(remote_url: &str, branch: &str) -> Self {
        Self::with_log(remote_url, branch, CallLog::default())
    }

    /// Like [`MockGitRepo::new`], recording into a shared call log
    pub fn with_log(remote_url: &str, branch: &str, log: CallLog) -> Self {
        Self {
            remote_url: Some(remote_url.to_string()),
            branch: branch.to_string(),
            push_error: None,
            push_calls: Mutex::new(Vec::new()),
            log,
        }
    }

    /// Checkout without an origin remote
    pub fn without_remote(branch: &str) -> Self {
        Self {
            remote_url: None,
            ..Self::new("", branch)
        }
    }

    /// Make `push` fail with `msg`
    pub fn failing_push(mut self, msg: &str) -> Self {
        self.push_error = Some(msg.to_string());
        self
    }

    /// Recorded `(remote, branch, force)` push calls
    pub fn push_calls(&self) -> Vec<(String, String, bool)> {
        self.push_calls.lock().unwrap().clone()
    }
}

impl GitRepo for MockGitRepo {
    fn remote_url(&self, remote: &str) -> Result<String> {
        self.log.lock().unwrap().push("remote_url".to_string());
        self.remote_url
            .clone()
            .ok_or_else(|| Error::RemoteResolution {
                remote: remote.to_string(),
                message: "No such remote".to_string(),
            })
    }

    fn current_branch(&self) -> Result<String> {
        self.log.lock().unwrap().push("current_branch".to_string());
        Ok(self.branch.clone())
    }

    fn push(&self, remote: &str, branch: &str, force: bool) -> Result<()> {
        self.log.lock().unwrap().push("push".to_string());
        self.push_calls
            .lock()
            .unwrap()
            .push((remote.to_string(), branch.to_string(), force));
        self.push_error.as_ref().map_or(Ok(()), |msg| {
            Err(Error::Push {
                branch: branch.to_string(),
                message: msg.clone(),
            })
        })
    }
}

/// Progress callback that keeps every event
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_event(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Helper to build a merge request
pub fn make_mr(id: u64, source: &str, target: &str, title: &str) -> MergeRequest {
    MergeRequest {
        id,
        title: title.to_string(),
        source_branch: source.to_string(),
        target_branch: target.to_string(),
        web_url: format!("https://gitlab.example.com/group/project/-/merge_requests/{id}"),
    }
}

/// Helper to build accounts with sequential ids
pub fn make_accounts(names: &[&str]) -> Vec<Account> {
    names
        .iter()
        .zip(1..)
        .map(|(name, id)| Account {
            id,
            username: format!("user{id}"),
            display_name: (*name).to_string(),
        })
        .collect()
}
