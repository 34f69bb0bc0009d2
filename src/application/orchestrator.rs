//! Deployment Orchestrator
//!
//! Turns the delta output and run settings into a deployment request and
//! hands it to the engine.

use tracing::{info, warn};

use crate::domain::ports::{DeltaOutput, DeploymentEngine, DeploymentRequest, DeploymentResult};
use crate::domain::value_objects::TestLevel;
use crate::error::{DefuseError, DefuseResult};

/// Target and policy of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSettings {
    pub target_org: String,
    pub test_level: TestLevel,
    pub wait_minutes: u32,
}

pub struct DeploymentOrchestrator<'a, E: DeploymentEngine + ?Sized> {
    engine: &'a E,
    settings: &'a DeploymentSettings,
}

impl<'a, E: DeploymentEngine + ?Sized> DeploymentOrchestrator<'a, E> {
    pub fn new(engine: &'a E, settings: &'a DeploymentSettings) -> Self {
        Self { engine, settings }
    }

    /// Request for `delta`; the destructive manifest is included only when
    /// its file exists
    pub fn request(&self, delta: &DeltaOutput) -> DeploymentRequest {
        DeploymentRequest {
            additions_manifest: delta.additions_manifest.clone(),
            destructive_manifest: delta
                .destructive_manifest
                .as_ref()
                .filter(|p| p.is_file())
                .cloned(),
            target_org: self.settings.target_org.clone(),
            test_level: self.settings.test_level,
            wait_minutes: self.settings.wait_minutes,
        }
    }

    /// Deploy; an engine-reported failure becomes `DeploymentFailed`
    pub fn run(&self, request: &DeploymentRequest) -> DefuseResult<DeploymentResult> {
        let result = self.engine.deploy(request)?;
        if result.success {
            info!(org = %request.target_org, "deployment succeeded");
            return Ok(result);
        }

        warn!(org = %request.target_org, code = ?result.exit_code, "deployment failed");
        Err(DefuseError::DeploymentFailed {
            target_org: request.target_org.clone(),
            exit_code: result.exit_code,
            diagnostic: result.diagnostic,
        })
    }
}
