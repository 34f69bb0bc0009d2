//! Dependency Scanner
//!
//! Finds every file under a source root that mentions a deleted component.
//!
//! Matching is a literal, case-sensitive substring test. A component named
//! `Helper` also matches `HelperFactory`, and names inside comments or
//! string literals count too. This is a known heuristic; the scanner does
//! not parse the target language.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::domain::entities::{DeletionManifest, DependencyMatch};
use crate::domain::ports::{FileSystem, FsResult};
use crate::domain::value_objects::IgnorePatterns;

/// Scanner configuration
#[derive(Debug, Default)]
pub struct ScanOptions {
    /// Paths excluded from the scan (from `.defuseignore`)
    pub ignore: IgnorePatterns,
    /// Lowercase extensions to consider; empty means every file
    pub extensions: Vec<String>,
}

pub struct DependencyScanner<'a, FS: FileSystem + ?Sized> {
    file_system: &'a FS,
    options: &'a ScanOptions,
    excluded: Vec<&'a Path>,
}

impl<'a, FS: FileSystem + ?Sized> DependencyScanner<'a, FS> {
    pub fn new(file_system: &'a FS, options: &'a ScanOptions) -> Self {
        Self {
            file_system,
            options,
            excluded: Vec::new(),
        }
    }

    /// Skip everything under `dir`, e.g. a delta output directory that
    /// lives inside the source root.
    pub fn excluding(mut self, dir: &'a Path) -> Self {
        if !dir.as_os_str().is_empty() {
            self.excluded.push(dir);
        }
        self
    }

    /// Scan `source_root` for references to `manifest` components.
    ///
    /// Output is sorted by path and independent of directory iteration
    /// order. An empty manifest returns immediately without touching the
    /// file system.
    pub fn scan(
        &self,
        manifest: &DeletionManifest,
        source_root: &Path,
    ) -> FsResult<Vec<DependencyMatch>> {
        if manifest.is_empty() {
            return Ok(Vec::new());
        }

        let names = manifest.names();
        let mut found: BTreeMap<PathBuf, BTreeSet<String>> = BTreeMap::new();

        for path in self.file_system.walk(source_root)? {
            if !self.is_candidate(&path, source_root) {
                continue;
            }

            let bytes = self.file_system.read(&path)?;
            let Ok(text) = std::str::from_utf8(&bytes) else {
                trace!(path = %path.display(), "skipping non-UTF-8 file");
                continue;
            };

            let members: BTreeSet<String> = names
                .iter()
                .filter(|name| text.contains(*name))
                .map(|name| name.to_string())
                .collect();

            if !members.is_empty() {
                debug!(path = %path.display(), ?members, "dependency found");
                found.entry(path).or_default().extend(members);
            }
        }

        Ok(found
            .into_iter()
            .map(|(file, members)| DependencyMatch::new(file, members))
            .collect())
    }

    fn is_candidate(&self, path: &Path, source_root: &Path) -> bool {
        if self.excluded.iter().any(|dir| path.starts_with(dir)) {
            trace!(path = %path.display(), "inside an excluded directory");
            return false;
        }
        let rel = path.strip_prefix(source_root).unwrap_or(path);
        if self.options.ignore.is_ignored(rel, false) {
            trace!(path = %rel.display(), "excluded by ignore file");
            return false;
        }
        if self.options.extensions.is_empty() {
            return true;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        self.options
            .extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.trim_start_matches('.'))))
    }
}
