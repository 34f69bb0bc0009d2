//! Working tree port
//!
//! Abstracts the version-control operations the snapshot guard needs to set
//! local modifications aside before neutralizing and to bring them back
//! afterwards.

use std::path::{Path, PathBuf};

use crate::error::DefuseResult;

/// What acquisition did with pre-existing local modifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StashState {
    /// Tree was clean (or stashing is disabled); nothing to reapply
    Clean,
    /// Local modifications were stashed under this message
    Stashed { message: String },
}

impl StashState {
    pub fn is_stashed(&self) -> bool {
        matches!(self, StashState::Stashed { .. })
    }
}

/// Version-controlled working tree
///
/// Implementations:
/// - `GitWorkingTree` - git stash based
/// - `PlainTree` - directory outside any repository; never dirty
pub trait WorkingTree {
    /// Whether there are uncommitted (or untracked) changes
    fn has_local_changes(&self) -> DefuseResult<bool>;

    /// Set local modifications aside under `message`.
    ///
    /// Paths in `exclude` stay in place.
    fn stash_push(&self, message: &str, include_untracked: bool, exclude: &[&Path])
        -> DefuseResult<()>;

    /// Reapply and drop the stash entry carrying `message`
    fn stash_pop(&self, message: &str) -> DefuseResult<()>;

    /// Whether a stash entry carrying `message` exists
    fn has_stash(&self, message: &str) -> DefuseResult<bool>;

    /// Directory for run state (lock, recovery journal), outside the
    /// scanned tree and never stashed
    fn state_dir(&self) -> PathBuf;
}
