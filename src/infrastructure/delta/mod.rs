//! Delta generators
//!
//! - `sgd` - sfdx-git-delta between two git revisions
//! - `org_snapshot` - retrieved org metadata compared with local source

mod org_snapshot;
mod sgd;

pub use org_snapshot::{compare_trees, OrgSnapshotDeltaGenerator};
pub use sgd::SgdDeltaGenerator;

use crate::error::DefuseError;

fn delta_failed(message: impl Into<String>) -> DefuseError {
    DefuseError::DeltaGenerationFailed {
        message: message.into(),
    }
}
