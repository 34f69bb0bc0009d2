//! Deletion manifest port

use std::path::Path;

use crate::domain::entities::DeletionManifest;
use crate::error::DefuseResult;

/// Reads the components declared in a destructive-changes manifest
///
/// `None`, or a path that does not exist, means there are no destructive
/// changes and yields an empty manifest.
pub trait ManifestReader {
    fn read(&self, path: Option<&Path>) -> DefuseResult<DeletionManifest>;
}
