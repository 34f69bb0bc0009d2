//! Pipeline Options

use std::path::PathBuf;

use crate::application::orchestrator::DeploymentSettings;
use crate::application::snapshot::SnapshotOptions;
use crate::domain::value_objects::DeltaMode;

/// Parameters of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Which delta generator produced the manifests
    pub mode: DeltaMode,
    /// Base revision (git-diff mode)
    pub base: String,
    /// Head revision (git-diff mode)
    pub head: String,
    /// Scanned and mutated tree
    pub source_root: PathBuf,
    /// Where the delta generator writes its manifests
    pub output_dir: PathBuf,
    pub deployment: DeploymentSettings,
    pub snapshot: SnapshotOptions,
    /// Stop after the scan; mutate and deploy nothing
    pub dry_run: bool,
}
