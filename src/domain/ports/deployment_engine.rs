//! Deployment engine port

use std::path::PathBuf;

use crate::domain::value_objects::TestLevel;
use crate::error::DefuseResult;

/// Everything the engine needs for one deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub additions_manifest: PathBuf,
    /// Omitted entirely when there are no destructive changes
    pub destructive_manifest: Option<PathBuf>,
    pub target_org: String,
    pub test_level: TestLevel,
    pub wait_minutes: u32,
}

/// Outcome reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Combined engine output, kept for the operator
    pub diagnostic: String,
}

impl DeploymentResult {
    pub fn succeeded(diagnostic: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn failed(exit_code: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            diagnostic: diagnostic.into(),
        }
    }
}

/// Deployment engine collaborator
///
/// A single blocking call. `Err` means the engine could not be started at
/// all; a deployment the engine rejected is `Ok` with `success == false`.
pub trait DeploymentEngine {
    fn deploy(&self, request: &DeploymentRequest) -> DefuseResult<DeploymentResult>;
}
