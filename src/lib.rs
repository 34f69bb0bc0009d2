//! defuse - deploy Salesforce destructive changes past their dependents
//!
//! Deleting a component that other source still references makes the
//! deployment fail. defuse finds every referencing line, comments it out
//! for the duration of one deployment, and puts every file back exactly as
//! it was afterwards, whatever the outcome.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{PipelineOptions, PipelineReport, PipelineUseCase, RecoverUseCase, ScanUseCase};
pub use config::Config;
pub use error::{DefuseError, DefuseResult, ErrorKind};
