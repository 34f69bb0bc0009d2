//! sfdx-git-delta generator

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use super::delta_failed;
use crate::domain::ports::{DeltaGenerator, DeltaOutput, DeltaRequest};
use crate::error::DefuseResult;
use crate::infrastructure::process::run_captured;

/// Runs `sf sgd source delta` in the project root
#[derive(Debug, Clone)]
pub struct SgdDeltaGenerator {
    sf: String,
    project_root: PathBuf,
}

impl SgdDeltaGenerator {
    pub fn new(sf: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            sf: sf.into(),
            project_root: project_root.into(),
        }
    }
}

impl DeltaGenerator for SgdDeltaGenerator {
    fn generate(&self, request: &DeltaRequest) -> DefuseResult<DeltaOutput> {
        std::fs::create_dir_all(&request.output_dir).map_err(|e| {
            delta_failed(format!("{}: {}", request.output_dir.display(), e))
        })?;

        let mut cmd = Command::new(&self.sf);
        cmd.current_dir(&self.project_root)
            .args(["sgd", "source", "delta", "--from", &request.base, "--to", &request.head])
            .arg("--output-dir")
            .arg(&request.output_dir)
            .arg("--source-dir")
            .arg(&request.source_root)
            .arg("--json");

        let out = run_captured(&mut cmd).map_err(|e| delta_failed(e.to_string()))?;
        if !out.success() {
            return Err(delta_failed(out.diagnostic()));
        }
        if let Some(message) = reported_failure(&out.stdout) {
            return Err(delta_failed(message));
        }

        let output = DeltaOutput::locate(&request.output_dir);
        if !output.additions_manifest.is_file() {
            return Err(delta_failed(format!(
                "no additions manifest at {}",
                output.additions_manifest.display()
            )));
        }

        debug!(?output, "delta located");
        info!(
            base = %request.base,
            head = %request.head,
            destructive = output.destructive_manifest.is_some(),
            "delta generated"
        );
        Ok(output)
    }

    fn describe(&self, request: &DeltaRequest) -> String {
        format!("git diff {}..{}", request.base, request.head)
    }
}

/// sgd may exit 0 and still report `"success": false` in its JSON output
fn reported_failure(stdout: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).ok()?;
    let body = value.get("result").unwrap_or(&value);
    if body.get("success").and_then(|s| s.as_bool()) != Some(false) {
        return None;
    }
    let message = body
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or("sgd reported failure");
    Some(message.to_string())
}
