//! Run state on disk: the recovery journal and the run lock

mod json;
mod lock;

pub use json::{JsonJournalStore, JOURNAL_FILE};
pub use lock::{RunLock, LOCK_FILE};
