//! Advisory run lock
//!
//! One `defuse` process per working tree. The lock is released when the
//! file handle is dropped, including when the process dies.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::{DefuseError, DefuseResult};

pub const LOCK_FILE: &str = "run.lock";

#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Take the exclusive lock in `state_dir` without blocking
    pub fn acquire(state_dir: &Path) -> DefuseResult<Self> {
        fs::create_dir_all(state_dir).map_err(|e| DefuseError::file(state_dir, e))?;
        let path = state_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| DefuseError::file(&path, e))?;

        if file.try_lock_exclusive().is_err() {
            return Err(DefuseError::Busy { lock: path });
        }
        debug!(path = %path.display(), "run lock acquired");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
