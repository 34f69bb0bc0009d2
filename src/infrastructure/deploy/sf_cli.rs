//! Deployment through `sf project deploy start`

use std::path::PathBuf;
use std::process::Command;

use tracing::info;

use crate::domain::ports::{DeploymentEngine, DeploymentRequest, DeploymentResult};
use crate::error::DefuseResult;
use crate::infrastructure::process::run_captured;

#[derive(Debug, Clone)]
pub struct SfDeployEngine {
    sf: String,
    project_root: PathBuf,
}

impl SfDeployEngine {
    pub fn new(sf: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            sf: sf.into(),
            project_root: project_root.into(),
        }
    }

    fn command(&self, request: &DeploymentRequest) -> Command {
        let mut cmd = Command::new(&self.sf);
        cmd.current_dir(&self.project_root)
            .args(["project", "deploy", "start", "--manifest"])
            .arg(&request.additions_manifest);
        if let Some(destructive) = &request.destructive_manifest {
            cmd.arg("--post-destructive-changes").arg(destructive);
        }
        cmd.args(["--target-org", &request.target_org])
            .args(["--test-level", request.test_level.as_str()])
            .args(["--wait", &request.wait_minutes.to_string()]);
        cmd
    }
}

impl DeploymentEngine for SfDeployEngine {
    fn deploy(&self, request: &DeploymentRequest) -> DefuseResult<DeploymentResult> {
        info!(
            org = %request.target_org,
            destructive = request.destructive_manifest.is_some(),
            test_level = %request.test_level,
            "deploying"
        );
        let out = run_captured(&mut self.command(request))?;

        let mut diagnostic = out.stdout.trim().to_string();
        let stderr = out.stderr.trim();
        if !stderr.is_empty() {
            if !diagnostic.is_empty() {
                diagnostic.push('\n');
            }
            diagnostic.push_str(stderr);
        }

        Ok(if out.success() {
            DeploymentResult::succeeded(diagnostic)
        } else {
            DeploymentResult::failed(out.code(), diagnostic)
        })
    }
}
