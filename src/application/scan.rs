//! Scan Use Case
//!
//! Read-only half of the pipeline: parse the deletion manifest, find
//! dependent files and work out what neutralizing them would change.
//! Backs `defuse scan` and dry runs.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::{DeletionManifest, DependencyMatch};
use crate::domain::ports::{FileSystem, ManifestReader};
use crate::domain::services::{DependencyScanner, NeutralizedFile, ScanOptions, SourceNeutralizer};
use crate::error::DefuseResult;

/// What a scan found
#[derive(Debug, Default)]
pub struct ScanReport {
    pub manifest: DeletionManifest,
    pub matches: Vec<DependencyMatch>,
    /// Rewrites the neutralizer would apply, in path order
    pub planned: Vec<NeutralizedFile>,
}

impl ScanReport {
    pub fn disabled_line_count(&self) -> usize {
        self.planned.iter().map(|p| p.lines.len()).sum()
    }
}

pub struct ScanUseCase<'a> {
    reader: &'a dyn ManifestReader,
    fs: &'a dyn FileSystem,
    options: &'a ScanOptions,
}

impl<'a> ScanUseCase<'a> {
    pub fn new(reader: &'a dyn ManifestReader, fs: &'a dyn FileSystem, options: &'a ScanOptions) -> Self {
        Self { reader, fs, options }
    }

    pub fn execute(&self, manifest: Option<&Path>, source_root: &Path) -> DefuseResult<ScanReport> {
        let manifest = self.reader.read(manifest)?;
        let matches = DependencyScanner::new(self.fs, self.options).scan(&manifest, source_root)?;
        let planned = plan_neutralization(self.fs, &matches)?;
        Ok(ScanReport {
            manifest,
            matches,
            planned,
        })
    }
}

/// Compute the rewrite for every match without writing anything.
///
/// Files that vanished since the scan are skipped with a warning.
pub fn plan_neutralization(
    fs: &dyn FileSystem,
    matches: &[DependencyMatch],
) -> DefuseResult<Vec<NeutralizedFile>> {
    let neutralizer = SourceNeutralizer::new();
    let mut planned = Vec::new();

    for m in matches {
        let content = match fs.read(m.file()) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                warn!(path = %m.file().display(), "matched file disappeared");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match neutralizer.neutralize(m.file(), &content, m.members()) {
            Some(plan) => planned.push(plan),
            None => debug!(path = %m.file().display(), "nothing to neutralize"),
        }
    }

    Ok(planned)
}
