//! Pipeline Result

use std::path::PathBuf;

use super::state::PipelineState;
use crate::domain::entities::DependencyMatch;
use crate::domain::ports::{DeltaOutput, DeploymentResult};
use crate::domain::services::NeutralizedFile;
use crate::error::DefuseError;

/// Outcome of a pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    /// Every state the run passed through, `Init` first
    pub trail: Vec<PipelineState>,
    pub delta: Option<DeltaOutput>,
    /// Deleted component names, manifest order
    pub components: Vec<String>,
    pub matches: Vec<DependencyMatch>,
    /// Files neutralized and the 1-based lines disabled in each
    pub neutralized: Vec<(PathBuf, Vec<usize>)>,
    /// Rewrites that a dry run would have applied
    pub planned: Vec<NeutralizedFile>,
    /// Files restored on release
    pub restored: usize,
    pub reapplied_stash: bool,
    pub deployment: Option<DeploymentResult>,
    /// Non-fatal problems (restore conflicts, vanished files)
    pub warnings: Vec<String>,
    /// The fatal error, if the run failed
    pub error: Option<DefuseError>,
    pub dry_run: bool,
}

impl PipelineReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            trail: vec![PipelineState::Init],
            delta: None,
            components: Vec::new(),
            matches: Vec::new(),
            neutralized: Vec::new(),
            planned: Vec::new(),
            restored: 0,
            reapplied_stash: false,
            deployment: None,
            warnings: Vec::new(),
            error: None,
            dry_run,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.trail.last().copied().unwrap_or(PipelineState::Init)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.state() == PipelineState::Done
    }

    pub fn disabled_line_count(&self) -> usize {
        self.neutralized.iter().map(|(_, lines)| lines.len()).sum()
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match &self.error {
            Some(e) => e.exit_code(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_report_starts_at_init() {
        let report = PipelineReport::new(false);
        assert_eq!(report.state(), PipelineState::Init);
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn interrupted_exit_code() {
        let mut report = PipelineReport::new(false);
        report.trail.push(PipelineState::Failed);
        report.error = Some(DefuseError::Interrupted);
        assert_eq!(report.exit_code(), 130);
    }
}
