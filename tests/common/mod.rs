//! Shared test utilities

#![allow(dead_code, unused_imports)]

mod mock_platform;

pub use mock_platform::{
    CallLog, CreateMrCall, MockForgeService, MockGitRepo, RecordingProgress, UpdateMrCall,
    make_accounts, make_mr,
};

use forge_push::types::{Platform, ProjectReference, ReconciliationRequest, WipDirective};

/// GitLab project reference for tests
pub fn gitlab_project() -> ProjectReference {
    ProjectReference {
        platform: Platform::GitLab,
        host: Some("gitlab.example.com".to_string()),
        namespace_path: "group/project".to_string(),
    }
}

/// GitHub project reference for tests
pub fn github_project() -> ProjectReference {
    ProjectReference {
        platform: Platform::GitHub,
        host: Some("github.com".to_string()),
        namespace_path: "owner/repo".to_string(),
    }
}

/// Request for `source` into `master` with no optional fields
pub fn request(source: &str) -> ReconciliationRequest {
    ReconciliationRequest {
        source_branch: source.to_string(),
        target_branch: "master".to_string(),
        wip_directive: WipDirective::None,
        ..ReconciliationRequest::default()
    }
}
