//! Dependency match entity

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A source file and the deleted components it mentions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyMatch {
    file: PathBuf,
    members: BTreeSet<String>,
}

impl DependencyMatch {
    pub fn new(file: impl Into<PathBuf>, members: BTreeSet<String>) -> Self {
        Self {
            file: file.into(),
            members,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }
}
