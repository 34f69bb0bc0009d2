//! Org snapshot delta generator
//!
//! Retrieves the target org's metadata into a scratch directory, then
//! compares it component by component with the local source root:
//!
//! - present locally, missing or different in the org: additions
//! - present in the org, missing locally: destructive changes
//!
//! Only the directory types known to `MetadataType` take part; anything
//! else in either tree is ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::delta_failed;
use crate::domain::ports::{DeltaGenerator, DeltaOutput, DeltaRequest, FileSystem};
use crate::domain::value_objects::{ComponentRef, ContentHash};
use crate::error::DefuseResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::manifest::{write_package_xml, PackageXml};
use crate::infrastructure::process::run_captured;

const ORG_MANIFEST: &str = "org-package";

/// file key (relative to the type directory's parent) -> content hash
type ComponentFiles = BTreeMap<PathBuf, ContentHash>;

#[derive(Debug, Clone)]
pub struct OrgSnapshotDeltaGenerator {
    sf: String,
    project_root: PathBuf,
    api_version: String,
}

impl OrgSnapshotDeltaGenerator {
    pub fn new(
        sf: impl Into<String>,
        project_root: impl Into<PathBuf>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            sf: sf.into(),
            project_root: project_root.into(),
            api_version: api_version.into(),
        }
    }

    fn sf(&self, args: &[&str], paths: &[(&str, &Path)]) -> DefuseResult<()> {
        let mut cmd = Command::new(&self.sf);
        cmd.current_dir(&self.project_root).args(args);
        for (flag, path) in paths {
            cmd.arg(flag).arg(path);
        }
        let out = run_captured(&mut cmd).map_err(|e| delta_failed(e.to_string()))?;
        if !out.success() {
            return Err(delta_failed(format!(
                "sf {} failed: {}",
                args.iter().take(3).copied().collect::<Vec<_>>().join(" "),
                out.diagnostic()
            )));
        }
        Ok(())
    }

    /// Retrieve every supported component of the org into `dir`
    fn retrieve(&self, org: &str, dir: &Path) -> DefuseResult<()> {
        self.sf(
            &[
                "project", "generate", "manifest", "--from-org", org, "--name", ORG_MANIFEST,
            ],
            &[("--output-dir", dir)],
        )?;
        let manifest = dir.join(format!("{}.xml", ORG_MANIFEST));
        let retrieved = dir.join("retrieved");
        self.sf(
            &["project", "retrieve", "start", "--target-org", org],
            &[("--manifest", &manifest), ("--output-dir", &retrieved)],
        )
    }
}

impl DeltaGenerator for OrgSnapshotDeltaGenerator {
    fn generate(&self, request: &DeltaRequest) -> DefuseResult<DeltaOutput> {
        let scratch = tempfile::tempdir().map_err(|e| delta_failed(e.to_string()))?;
        self.retrieve(&request.target_org, scratch.path())?;

        let (additions, destructive) = compare_trees(
            &request.source_root,
            &scratch.path().join("retrieved"),
            &self.api_version,
        )?;
        info!(
            org = %request.target_org,
            additions = additions.len(),
            destructive = destructive.len(),
            "org snapshot compared"
        );

        write_manifests(&request.output_dir, &additions, &destructive)?;
        Ok(DeltaOutput::locate(&request.output_dir))
    }

    fn describe(&self, request: &DeltaRequest) -> String {
        format!("org snapshot of '{}'", request.target_org)
    }
}

/// Write both manifests into `output_dir`. An empty destructive set leaves
/// no destructive manifest behind, including one from an earlier run.
fn write_manifests(
    output_dir: &Path,
    additions: &PackageXml,
    destructive: &PackageXml,
) -> DefuseResult<()> {
    write_package_xml(&output_dir.join("package").join("package.xml"), additions)
        .map_err(|e| delta_failed(e.to_string()))?;
    let destructive_path = output_dir
        .join("destructiveChanges")
        .join("destructiveChanges.xml");
    if !destructive.is_empty() {
        return write_package_xml(&destructive_path, destructive)
            .map_err(|e| delta_failed(e.to_string()));
    }
    match std::fs::remove_file(&destructive_path) {
        Ok(()) => {
            debug!(path = %destructive_path.display(), "removed stale destructive manifest");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(delta_failed(format!(
            "{}: {}",
            destructive_path.display(),
            e
        ))),
    }
}

/// Compare a local source tree against a retrieved org tree.
///
/// Returns `(additions, destructive)` manifests.
pub fn compare_trees(
    local_root: &Path,
    org_root: &Path,
    api_version: &str,
) -> DefuseResult<(PackageXml, PackageXml)> {
    let local = index_tree(local_root)?;
    let org = if org_root.is_dir() {
        index_tree(org_root)?
    } else {
        BTreeMap::new()
    };

    let mut additions = PackageXml::new(api_version);
    let mut destructive = PackageXml::new(api_version);

    for (component, files) in &local {
        if org.get(component) != Some(files) {
            debug!(kind = %component.kind, name = %component.name, "changed locally");
            additions.add(component);
        }
    }
    for component in org.keys() {
        if !local.contains_key(component) {
            debug!(kind = %component.kind, name = %component.name, "only in org");
            destructive.add(component);
        }
    }

    Ok((additions, destructive))
}

fn index_tree(root: &Path) -> DefuseResult<BTreeMap<ComponentRef, ComponentFiles>> {
    let fs = LocalFs::new();
    let mut index: BTreeMap<ComponentRef, ComponentFiles> = BTreeMap::new();

    for path in fs.walk(root).map_err(|e| delta_failed(e.to_string()))? {
        let rel = path.strip_prefix(root).unwrap_or(&path);
        let Some((component, key)) = ComponentRef::from_path(rel) else {
            continue;
        };
        let bytes = fs.read(&path).map_err(|e| delta_failed(e.to_string()))?;
        index
            .entry(component)
            .or_default()
            .insert(key, ContentHash::from_bytes(&bytes));
    }

    Ok(index)
}
