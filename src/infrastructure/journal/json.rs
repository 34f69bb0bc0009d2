//! JSON recovery journal at `<state dir>/journal.json`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ports::{FileSystem, JournalSnapshot, JournalStore};
use crate::error::{DefuseError, DefuseResult};
use crate::infrastructure::fs::LocalFs;

pub const JOURNAL_FILE: &str = "journal.json";

#[derive(Debug, Clone)]
pub struct JsonJournalStore {
    path: PathBuf,
    fs: LocalFs,
}

impl JsonJournalStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(JOURNAL_FILE),
            fs: LocalFs::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn journal_error(&self, message: impl Into<String>) -> DefuseError {
        DefuseError::Journal {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

impl JournalStore for JsonJournalStore {
    fn save(&self, snapshot: &JournalSnapshot) -> DefuseResult<()> {
        let content =
            serde_json::to_vec_pretty(snapshot).map_err(|e| self.journal_error(e.to_string()))?;
        self.fs
            .write(&self.path, &content)
            .map_err(|e| self.journal_error(e.to_string()))?;
        debug!(path = %self.path.display(), entries = snapshot.entries.len(), "journal saved");
        Ok(())
    }

    fn load(&self) -> DefuseResult<Option<JournalSnapshot>> {
        let content = match self.fs.read(&self.path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(self.journal_error(e.to_string())),
        };
        let snapshot: JournalSnapshot =
            serde_json::from_slice(&content).map_err(|e| self.journal_error(e.to_string()))?;
        if snapshot.version != JournalSnapshot::VERSION {
            return Err(self.journal_error(format!(
                "unsupported journal version {} (expected {})",
                snapshot.version,
                JournalSnapshot::VERSION
            )));
        }
        Ok(Some(snapshot))
    }

    fn clear(&self) -> DefuseResult<()> {
        match self.fs.remove(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "journal cleared");
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(self.journal_error(e.to_string())),
        }
    }
}
