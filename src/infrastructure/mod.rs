//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `manifest/` - package.xml reading and writing
//! - `git/` - Working tree (git stash) and plain directories
//! - `delta/` - Delta generators (sfdx-git-delta, org snapshot)
//! - `deploy/` - Deployment through the sf CLI
//! - `journal/` - Recovery journal and run lock
//! - `events/` - Machine-readable event output

pub mod delta;
pub mod deploy;
pub mod events;
pub mod fs;
pub mod git;
pub mod journal;
pub mod manifest;
pub mod process;

// Re-export for convenience
pub use delta::{OrgSnapshotDeltaGenerator, SgdDeltaGenerator};
pub use deploy::SfDeployEngine;
pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use git::{GitWorkingTree, PlainTree};
pub use journal::{JsonJournalStore, RunLock};
pub use manifest::XmlManifestReader;
