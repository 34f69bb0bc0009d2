//! Neutralization records
//!
//! A record captures everything needed to put one mutated file back the
//! way it was. The ledger holds at most one record per file for the
//! lifetime of a run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Pre-mutation snapshot of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeutralizationRecord {
    file: PathBuf,
    original_content: Vec<u8>,
    disabled_lines: Vec<usize>,
    neutralized_hash: ContentHash,
}

impl NeutralizationRecord {
    pub fn new(
        file: impl Into<PathBuf>,
        original_content: Vec<u8>,
        disabled_lines: Vec<usize>,
        neutralized_hash: ContentHash,
    ) -> Self {
        Self {
            file: file.into(),
            original_content,
            disabled_lines,
            neutralized_hash,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn original_content(&self) -> &[u8] {
        &self.original_content
    }

    /// 1-based line numbers that were disabled
    pub fn disabled_lines(&self) -> &[usize] {
        &self.disabled_lines
    }

    /// Hash of the file content right after neutralization
    pub fn neutralized_hash(&self) -> &ContentHash {
        &self.neutralized_hash
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A record for this file already exists in this run
    AlreadyRecorded(PathBuf),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::AlreadyRecorded(path) => {
                write!(f, "{} was already neutralized in this run", path.display())
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// Records of every file mutated in the current run, keyed by path
#[derive(Debug, Default)]
pub struct NeutralizationLedger {
    records: BTreeMap<PathBuf, NeutralizationRecord>,
}

impl NeutralizationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; a second record for the same file is rejected
    pub fn insert(&mut self, record: NeutralizationRecord) -> Result<(), LedgerError> {
        if self.records.contains_key(record.file()) {
            return Err(LedgerError::AlreadyRecorded(record.file().to_path_buf()));
        }
        self.records.insert(record.file.clone(), record);
        Ok(())
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.records.contains_key(file)
    }

    pub fn records(&self) -> impl Iterator<Item = &NeutralizationRecord> {
        self.records.values()
    }

    /// Remove and return every record
    pub fn drain(&mut self) -> Vec<NeutralizationRecord> {
        std::mem::take(&mut self.records).into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of disabled lines across all records
    pub fn disabled_line_count(&self) -> usize {
        self.records.values().map(|r| r.disabled_lines.len()).sum()
    }
}
