//! Domain Services
//!
//! Scanning and rewriting logic. Everything here goes through ports and is
//! testable without git or the sf CLI.

mod neutralizer;
mod preview;
mod scanner;

pub use neutralizer::{neutralize_text, revive_text, NeutralizedFile, SourceNeutralizer};
pub use preview::{Preview, PreviewStats};
pub use scanner::{DependencyScanner, ScanOptions};
