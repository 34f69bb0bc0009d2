//! Recover Use Case
//!
//! Undoes a neutralization episode whose process died before it could
//! release its guard, using the journal that episode left behind.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::domain::ports::{FileSystem, JournalEntry, JournalStore, WorkingTree};
use crate::domain::services::revive_text;
use crate::domain::value_objects::{CommentStyle, ContentHash};
use crate::error::{DefuseError, DefuseResult};

/// What recovery did
#[derive(Debug, Default)]
pub struct RecoverReport {
    /// A journal was found
    pub found: bool,
    /// Files whose original content was written back unchanged
    pub restored: Vec<PathBuf>,
    /// Files edited after neutralization; disabled lines revived in place
    pub revived: Vec<(PathBuf, usize)>,
    pub reapplied_stash: bool,
    pub warnings: Vec<String>,
}

impl RecoverReport {
    pub fn file_count(&self) -> usize {
        self.restored.len() + self.revived.len()
    }
}

pub struct RecoverUseCase<'a> {
    fs: &'a dyn FileSystem,
    tree: &'a dyn WorkingTree,
    journal: &'a dyn JournalStore,
}

impl<'a> RecoverUseCase<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        tree: &'a dyn WorkingTree,
        journal: &'a dyn JournalStore,
    ) -> Self {
        Self { fs, tree, journal }
    }

    pub fn execute(&self) -> DefuseResult<RecoverReport> {
        let mut report = RecoverReport::default();
        let Some(snapshot) = self.journal.load()? else {
            info!("no journal; nothing to recover");
            return Ok(report);
        };
        report.found = true;
        info!(
            started_at = %snapshot.started_at,
            files = snapshot.entries.len(),
            "recovering unfinished run"
        );

        for entry in &snapshot.entries {
            self.recover_file(entry, &mut report)?;
        }

        if let Some(message) = &snapshot.stash {
            if self.tree.has_stash(message)? {
                match self.tree.stash_pop(message) {
                    Ok(()) => report.reapplied_stash = true,
                    Err(e) => {
                        let conflict = DefuseError::RestoreConflict {
                            stash: message.clone(),
                            message: e.to_string(),
                        };
                        warn!(error = %conflict, "stash not reapplied");
                        report.warnings.push(conflict.to_string());
                    }
                }
            } else {
                report.warnings.push(format!(
                    "stash entry '{}' no longer exists; local changes were already reapplied or dropped",
                    message
                ));
            }
        }

        self.journal.clear()?;
        Ok(report)
    }

    fn recover_file(&self, entry: &JournalEntry, report: &mut RecoverReport) -> DefuseResult<()> {
        let current = match self.fs.read(&entry.file) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                self.fs.write(&entry.file, entry.original.as_bytes())?;
                report.warnings.push(format!(
                    "{} was missing; original content recreated",
                    entry.file.display()
                ));
                report.restored.push(entry.file.clone());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if ContentHash::from_bytes(&current).as_str() == entry.neutralized_hash {
            self.fs.write(&entry.file, entry.original.as_bytes())?;
            report.restored.push(entry.file.clone());
            return Ok(());
        }

        let Ok(text) = std::str::from_utf8(&current) else {
            report.warnings.push(format!(
                "{} changed since neutralization and is not text; left as is",
                entry.file.display()
            ));
            return Ok(());
        };
        let (revived, count) = revive_text(text, CommentStyle::for_path(&entry.file));
        if count > 0 {
            self.fs.write(&entry.file, revived.as_bytes())?;
            report.warnings.push(format!(
                "{} was edited after neutralization; {} disabled line(s) revived in place, review the file",
                entry.file.display(),
                count
            ));
        }
        report.revived.push((entry.file.clone(), count));
        Ok(())
    }
}
