//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod delta_generator;
pub mod deployment_engine;
pub mod file_system;
pub mod journal_store;
pub mod manifest_reader;
pub mod pipeline_events;
pub mod working_tree;

pub use delta_generator::{DeltaGenerator, DeltaOutput, DeltaRequest};
pub use deployment_engine::{DeploymentEngine, DeploymentRequest, DeploymentResult};
pub use file_system::{FileSystem, FsError, FsResult};
pub use journal_store::{JournalEntry, JournalSnapshot, JournalStore};
pub use manifest_reader::ManifestReader;
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink};
pub use working_tree::{StashState, WorkingTree};
