//! Delta Mode Value Object
//!
//! Selects which collaborator computes the additions and destructive
//! manifests for a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeltaMode {
    /// Diff two git revisions of the local source (sfdx-git-delta)
    #[default]
    GitDiff,
    /// Diff a retrieved snapshot of the target org against local source
    OrgSnapshot,
}

impl DeltaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaMode::GitDiff => "git-diff",
            DeltaMode::OrgSnapshot => "org-snapshot",
        }
    }
}

impl fmt::Display for DeltaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeltaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "git-diff" | "git" | "gitdiff" => Ok(DeltaMode::GitDiff),
            "org-snapshot" | "org" | "orgsnapshot" => Ok(DeltaMode::OrgSnapshot),
            other => Err(format!(
                "unknown mode '{}' (expected git-diff or org-snapshot)",
                other
            )),
        }
    }
}
