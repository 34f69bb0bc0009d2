//! Use Case Factory
//!
//! Wires infrastructure into the application layer. This is the
//! dependency injection point for the binary.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::ports::{DeltaGenerator, WorkingTree};
use crate::domain::value_objects::DeltaMode;
use crate::error::{DefuseError, DefuseResult};
use crate::infrastructure::{
    GitWorkingTree, JsonJournalStore, OrgSnapshotDeltaGenerator, PlainTree, RunLock,
    SfDeployEngine, SgdDeltaGenerator,
};

/// Files that mark the root of a Salesforce DX project
const PROJECT_MARKERS: &[&str] = &["sfdx-project.json", "defuse.toml"];

/// Discover the project root from an invocation directory.
///
/// The nearest ancestor holding `sfdx-project.json` or `defuse.toml` wins,
/// then the nearest `.git`. Falls back to `start`.
pub fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if PROJECT_MARKERS.iter().any(|m| dir.join(m).is_file()) {
            return dir.to_path_buf();
        }
    }
    for dir in start.ancestors() {
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// The project a command operates on
pub struct Workspace {
    pub root: PathBuf,
    pub tree: Box<dyn WorkingTree>,
}

impl Workspace {
    /// Open the project containing `start`
    pub fn open(start: &Path, git: &str) -> DefuseResult<Self> {
        let root = discover_project_root(start);
        let tree: Box<dyn WorkingTree> = match GitWorkingTree::discover(git, &root) {
            Ok(Some(repo)) => {
                debug!(toplevel = %repo.toplevel().display(), "git working tree");
                Box::new(repo)
            }
            Ok(None) => Box::new(PlainTree::new(&root)),
            Err(DefuseError::Tool { program, message }) => {
                warn!(%program, %message, "git unavailable; local changes will not be stashed");
                Box::new(PlainTree::new(&root))
            }
            Err(e) => return Err(e),
        };
        Ok(Self { root, tree })
    }

    /// Resolve a path given on the command line or in config
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.tree.state_dir()
    }

    pub fn journal(&self) -> JsonJournalStore {
        JsonJournalStore::new(&self.state_dir())
    }

    /// Exclusive claim on the working tree for the rest of the command
    pub fn lock(&self) -> DefuseResult<RunLock> {
        RunLock::acquire(&self.state_dir())
    }
}

/// Create the delta generator for `mode`
pub fn create_delta_generator(
    mode: DeltaMode,
    config: &Config,
    project_root: &Path,
) -> Box<dyn DeltaGenerator> {
    match mode {
        DeltaMode::GitDiff => Box::new(SgdDeltaGenerator::new(&config.tools.sf, project_root)),
        DeltaMode::OrgSnapshot => Box::new(OrgSnapshotDeltaGenerator::new(
            &config.tools.sf,
            project_root,
            &config.deploy.api_version,
        )),
    }
}

pub fn create_deploy_engine(config: &Config, project_root: &Path) -> SfDeployEngine {
    SfDeployEngine::new(&config.tools.sf, project_root)
}
