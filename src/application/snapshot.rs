//! Snapshot Guard
//!
//! Scopes one neutralization episode. Acquiring the guard sets local
//! modifications aside; every file mutation goes through [`SnapshotGuard::apply`],
//! which journals the original before touching the file; releasing puts
//! every file back byte for byte and reapplies the local modifications.
//!
//! Release happens exactly once: either explicitly through
//! [`SnapshotGuard::release`], which consumes the guard, or from `Drop` when
//! the guard goes out of scope on an early return or a panic.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::{NeutralizationLedger, NeutralizationRecord};
use crate::domain::ports::{FileSystem, JournalEntry, JournalSnapshot, JournalStore, StashState, WorkingTree};
use crate::domain::services::NeutralizedFile;
use crate::domain::value_objects::ContentHash;
use crate::error::{DefuseError, DefuseResult};

/// How local modifications are handled on acquire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Set uncommitted changes aside before neutralizing
    pub stash: bool,
    /// Include untracked files in the stash
    pub include_untracked: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            stash: true,
            include_untracked: true,
        }
    }
}

/// Outcome of a release
#[derive(Debug, Default)]
pub struct ReleaseReport {
    /// Files written back to their original content
    pub restored: Vec<PathBuf>,
    /// Files that could not be written back; they stay in the journal
    pub unrestored: Vec<(PathBuf, String)>,
    /// Local modifications were reapplied
    pub reapplied_stash: bool,
    /// Local modifications could not be reapplied
    pub conflict: Option<DefuseError>,
}

impl ReleaseReport {
    /// Every neutralized file is back to its original content
    pub fn is_complete(&self) -> bool {
        self.unrestored.is_empty()
    }

    /// Human-readable warnings for the operator
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .unrestored
            .iter()
            .map(|(path, err)| {
                format!(
                    "{} was not restored ({}); run `defuse recover`",
                    path.display(),
                    err
                )
            })
            .collect();
        if let Some(conflict) = &self.conflict {
            warnings.push(conflict.to_string());
        }
        warnings
    }
}

pub struct SnapshotGuard<'a> {
    fs: &'a dyn FileSystem,
    tree: &'a dyn WorkingTree,
    journal: &'a dyn JournalStore,
    stash: StashState,
    ledger: NeutralizationLedger,
    persisted: JournalSnapshot,
    released: bool,
}

impl<'a> SnapshotGuard<'a> {
    /// Open a neutralization episode.
    ///
    /// Refuses to start while a journal from an unfinished run exists. Paths
    /// in `exclude` (the delta output) are never stashed.
    pub fn acquire(
        fs: &'a dyn FileSystem,
        tree: &'a dyn WorkingTree,
        journal: &'a dyn JournalStore,
        options: SnapshotOptions,
        exclude: &[&Path],
    ) -> DefuseResult<Self> {
        if let Some(previous) = journal.load()? {
            return Err(DefuseError::Journal {
                path: tree.state_dir(),
                message: format!(
                    "a run started at {} did not finish cleanly; run `defuse recover` first",
                    previous.started_at.to_rfc3339()
                ),
            });
        }

        let stash = if options.stash && tree.has_local_changes()? {
            let message = stash_message();
            tree.stash_push(&message, options.include_untracked, exclude)?;
            // nothing eligible (e.g. only untracked files without
            // include_untracked) leaves no entry behind
            match tree.has_stash(&message) {
                Ok(false) => {
                    debug!("no stash entry created; nothing to set aside");
                    StashState::Clean
                }
                Ok(true) | Err(_) => StashState::Stashed { message },
            }
        } else {
            StashState::Clean
        };

        let persisted = JournalSnapshot::new(match &stash {
            StashState::Stashed { message } => Some(message.clone()),
            StashState::Clean => None,
        });

        let guard = Self {
            fs,
            tree,
            journal,
            stash,
            ledger: NeutralizationLedger::new(),
            persisted,
            released: false,
        };
        if guard.stash.is_stashed() {
            // a stashed run must be recoverable even before the first write
            guard.journal.save(&guard.persisted)?;
        }
        info!(stashed = guard.stash.is_stashed(), "snapshot acquired");
        Ok(guard)
    }

    pub fn stash_state(&self) -> &StashState {
        &self.stash
    }

    pub fn ledger(&self) -> &NeutralizationLedger {
        &self.ledger
    }

    /// Journal and record `file`, then write its neutralized content
    pub fn apply(&mut self, file: NeutralizedFile) -> DefuseResult<()> {
        if self.ledger.contains(&file.path) {
            return Err(DefuseError::Journal {
                path: file.path.clone(),
                message: "file was already neutralized in this run".to_string(),
            });
        }

        let original = String::from_utf8(file.original.clone()).map_err(|_| DefuseError::Journal {
            path: file.path.clone(),
            message: "original content is not UTF-8".to_string(),
        })?;
        let hash = ContentHash::from_content(&file.rewritten);

        self.persisted.entries.push(JournalEntry {
            file: file.path.clone(),
            original,
            neutralized_hash: hash.to_string(),
        });
        if let Err(e) = self.journal.save(&self.persisted) {
            self.persisted.entries.pop();
            return Err(e);
        }

        let record = NeutralizationRecord::new(&file.path, file.original, file.lines, hash);
        self.ledger.insert(record).map_err(|e| DefuseError::Journal {
            path: file.path.clone(),
            message: e.to_string(),
        })?;

        self.fs.write(&file.path, file.rewritten.as_bytes())?;
        debug!(path = %file.path.display(), "neutralized");
        Ok(())
    }

    /// Restore every file and reapply local modifications
    pub fn release(mut self) -> ReleaseReport {
        let report = self.restore_all();
        self.released = true;
        report
    }

    fn restore_all(&mut self) -> ReleaseReport {
        let mut report = ReleaseReport::default();

        for record in self.ledger.drain() {
            match self.fs.write(record.file(), record.original_content()) {
                Ok(()) => {
                    debug!(path = %record.file().display(), "restored");
                    report.restored.push(record.file().to_path_buf());
                }
                Err(e) => {
                    warn!(path = %record.file().display(), error = %e, "restore failed");
                    report.unrestored.push((record.file().to_path_buf(), e.to_string()));
                }
            }
        }

        if let StashState::Stashed { message } = &self.stash {
            match self.tree.stash_pop(message) {
                Ok(()) => report.reapplied_stash = true,
                Err(e) => {
                    warn!(stash = %message, error = %e, "local changes not reapplied");
                    report.conflict = Some(DefuseError::RestoreConflict {
                        stash: message.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let journal_result = if report.is_complete() {
            self.journal.clear()
        } else {
            self.persisted
                .entries
                .retain(|entry| report.unrestored.iter().any(|(p, _)| *p == entry.file));
            self.persisted.stash = None;
            self.journal.save(&self.persisted)
        };
        if let Err(e) = journal_result {
            warn!(error = %e, "journal not updated after release");
        }

        info!(
            restored = report.restored.len(),
            unrestored = report.unrestored.len(),
            reapplied_stash = report.reapplied_stash,
            "snapshot released"
        );
        report
    }
}

impl Drop for SnapshotGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let report = self.restore_all();
        if report.is_complete() {
            info!(files = report.restored.len(), "snapshot released on drop");
        } else {
            warn!(
                files = report.unrestored.len(),
                "snapshot released on drop with unrestored files"
            );
        }
    }
}

/// Unique, recognisable stash message for this run
fn stash_message() -> String {
    format!(
        "defuse snapshot {} pid {}",
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        std::process::id()
    )
}
