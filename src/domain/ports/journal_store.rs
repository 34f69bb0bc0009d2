//! Recovery journal port
//!
//! The journal is the on-disk twin of the in-memory ledger. It is written
//! before each file is mutated so that a run killed without a chance to
//! clean up can be undone later by `defuse recover`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DefuseResult;

/// One mutated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub file: PathBuf,
    /// Full original text; only UTF-8 files are ever neutralized
    pub original: String,
    /// `sha256:` hash of the neutralized content
    pub neutralized_hash: String,
}

/// Whole journal content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalSnapshot {
    pub version: u32,
    pub started_at: DateTime<Utc>,
    /// Stash message when local modifications were set aside
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stash: Option<String>,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

impl JournalSnapshot {
    pub const VERSION: u32 = 1;

    pub fn new(stash: Option<String>) -> Self {
        Self {
            version: Self::VERSION,
            started_at: Utc::now(),
            stash,
            entries: Vec::new(),
        }
    }
}

/// Persistence for the recovery journal
pub trait JournalStore {
    /// Durably replace the journal with `snapshot`
    fn save(&self, snapshot: &JournalSnapshot) -> DefuseResult<()>;

    /// Current journal, if a run left one behind
    fn load(&self) -> DefuseResult<Option<JournalSnapshot>>;

    /// Remove the journal after a complete restoration
    fn clear(&self) -> DefuseResult<()>;
}
