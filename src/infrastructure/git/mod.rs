//! Working tree implementations
//!
//! `GitWorkingTree` shells out to the git binary; `PlainTree` stands in for
//! a project that is not under version control.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::domain::ports::WorkingTree;
use crate::error::{DefuseError, DefuseResult};
use crate::infrastructure::process::run_captured;

/// Name of the run-state directory inside the git dir
const STATE_DIR: &str = "defuse";

/// A git checkout
#[derive(Debug, Clone)]
pub struct GitWorkingTree {
    git: String,
    toplevel: PathBuf,
    git_dir: PathBuf,
}

impl GitWorkingTree {
    /// Locate the repository containing `dir`.
    ///
    /// Returns `Ok(None)` when `dir` is not inside a repository, and an
    /// error only when git itself cannot be run.
    pub fn discover(git: &str, dir: &Path) -> DefuseResult<Option<Self>> {
        let mut cmd = Command::new(git);
        cmd.current_dir(dir)
            .args(["rev-parse", "--show-toplevel", "--absolute-git-dir"]);
        let out = run_captured(&mut cmd)?;
        if !out.success() {
            debug!(dir = %dir.display(), "not a git repository");
            return Ok(None);
        }

        let mut lines = out.stdout.lines();
        let (Some(toplevel), Some(git_dir)) = (lines.next(), lines.next()) else {
            return Err(DefuseError::Vcs {
                operation: "rev-parse".to_string(),
                message: format!("unexpected output: {}", out.stdout.trim()),
            });
        };

        Ok(Some(Self {
            git: git.to_string(),
            toplevel: PathBuf::from(toplevel.trim()),
            git_dir: PathBuf::from(git_dir.trim()),
        }))
    }

    pub fn toplevel(&self) -> &Path {
        &self.toplevel
    }

    fn git(&self, operation: &str, args: &[&str]) -> DefuseResult<String> {
        let mut cmd = Command::new(&self.git);
        cmd.current_dir(&self.toplevel).args(args);
        let out = run_captured(&mut cmd)?;
        if !out.success() {
            return Err(DefuseError::Vcs {
                operation: operation.to_string(),
                message: out.diagnostic(),
            });
        }
        Ok(out.stdout)
    }

    /// `stash@{n}` of the entry whose subject ends with `message`
    fn find_stash(&self, message: &str) -> DefuseResult<Option<String>> {
        let list = self.git("stash list", &["stash", "list", "--format=%gd%x00%gs"])?;
        Ok(list.lines().find_map(|line| {
            let (reference, subject) = line.split_once('\0')?;
            subject.ends_with(message).then(|| reference.to_string())
        }))
    }

    /// Pathspec excluding `path` when it lies inside the checkout
    fn exclude_pathspec(&self, path: &Path) -> Option<String> {
        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let toplevel = self
            .toplevel
            .canonicalize()
            .unwrap_or_else(|_| self.toplevel.clone());
        let rel = absolute.strip_prefix(&toplevel).ok()?;
        if rel.as_os_str().is_empty() {
            return None;
        }
        Some(format!(":(exclude){}", rel.to_string_lossy()))
    }
}

impl WorkingTree for GitWorkingTree {
    fn has_local_changes(&self) -> DefuseResult<bool> {
        let status = self.git("status", &["status", "--porcelain"])?;
        Ok(!status.trim().is_empty())
    }

    fn stash_push(
        &self,
        message: &str,
        include_untracked: bool,
        exclude: &[&Path],
    ) -> DefuseResult<()> {
        let excludes: Vec<String> = exclude
            .iter()
            .filter_map(|p| self.exclude_pathspec(p))
            .collect();

        let mut args = vec!["stash", "push"];
        if include_untracked {
            args.push("--include-untracked");
        }
        args.extend(["-m", message, "--", "."]);
        args.extend(excludes.iter().map(String::as_str));

        self.git("stash push", &args)?;
        info!(stash = message, "local changes set aside");
        Ok(())
    }

    fn stash_pop(&self, message: &str) -> DefuseResult<()> {
        let reference = self.find_stash(message)?.ok_or_else(|| DefuseError::Vcs {
            operation: "stash pop".to_string(),
            message: format!("no stash entry named '{}'", message),
        })?;
        self.git("stash pop", &["stash", "pop", &reference])?;
        info!(stash = message, "local changes reapplied");
        Ok(())
    }

    fn has_stash(&self, message: &str) -> DefuseResult<bool> {
        Ok(self.find_stash(message)?.is_some())
    }

    fn state_dir(&self) -> PathBuf {
        self.git_dir.join(STATE_DIR)
    }
}

/// A directory outside version control. Nothing is ever stashed.
#[derive(Debug, Clone)]
pub struct PlainTree {
    root: PathBuf,
}

impl PlainTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl WorkingTree for PlainTree {
    fn has_local_changes(&self) -> DefuseResult<bool> {
        Ok(false)
    }

    fn stash_push(&self, _: &str, _: bool, _: &[&Path]) -> DefuseResult<()> {
        Ok(())
    }

    fn stash_pop(&self, _: &str) -> DefuseResult<()> {
        Ok(())
    }

    fn has_stash(&self, _: &str) -> DefuseResult<bool> {
        Ok(false)
    }

    fn state_dir(&self) -> PathBuf {
        self.root.join(".defuse")
    }
}
