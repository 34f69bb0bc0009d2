//! Delta generation port
//!
//! A delta generator compares two states of the metadata and writes an
//! additions manifest plus, when something was removed, a destructive
//! manifest into an output directory.

use std::path::{Path, PathBuf};

use crate::error::DefuseResult;

/// Inputs of one delta computation
#[derive(Debug, Clone)]
pub struct DeltaRequest {
    /// Base revision (`--from`)
    pub base: String,
    /// Head revision (`--to`)
    pub head: String,
    /// Package directory holding the source-format metadata
    pub source_root: PathBuf,
    /// Directory receiving the generated manifests
    pub output_dir: PathBuf,
    /// Org alias, needed by generators that read the org
    pub target_org: String,
}

/// Manifests produced by a delta generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaOutput {
    pub additions_manifest: PathBuf,
    pub destructive_manifest: Option<PathBuf>,
}

impl DeltaOutput {
    /// Locate the conventional `package/package.xml` and
    /// `destructiveChanges/destructiveChanges.xml` under `output_dir`.
    ///
    /// The destructive manifest is `None` when its file does not exist.
    pub fn locate(output_dir: &Path) -> Self {
        let destructive = output_dir
            .join("destructiveChanges")
            .join("destructiveChanges.xml");
        Self {
            additions_manifest: output_dir.join("package").join("package.xml"),
            destructive_manifest: destructive.is_file().then_some(destructive),
        }
    }
}

/// Delta generation collaborator
///
/// Implementations:
/// - `SgdDeltaGenerator` - `sf sgd source delta` between git revisions
/// - `OrgSnapshotDeltaGenerator` - retrieved org snapshot vs local source
pub trait DeltaGenerator {
    /// Produce the manifests; any failure is `DeltaGenerationFailed`
    fn generate(&self, request: &DeltaRequest) -> DefuseResult<DeltaOutput>;

    /// Short label for progress output
    fn describe(&self, request: &DeltaRequest) -> String;
}
