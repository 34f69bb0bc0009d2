//! Pipeline Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables per-stage summaries, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::value_objects::DeltaMode;

/// Event emitted during a pipeline run
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Delta manifests generated
    DeltaReady {
        mode: DeltaMode,
        additions_manifest: PathBuf,
        destructive_manifest: Option<PathBuf>,
    },

    /// Deletion manifest parsed
    ManifestParsed { components: Vec<String> },

    /// Dependency scan completed
    Scanned {
        files: Vec<(PathBuf, Vec<String>)>,
    },

    /// Snapshot guard acquired
    SnapshotAcquired { stashed: bool },

    /// One file neutralized
    FileNeutralized { path: PathBuf, lines: Vec<usize> },

    /// Deployment request issued
    DeployStarted {
        target_org: String,
        destructive: bool,
    },

    /// Deployment engine returned
    DeployFinished { success: bool, diagnostic: String },

    /// Snapshot guard released
    Restored { files: usize, reapplied_stash: bool },

    /// Non-fatal problem that needs operator attention
    Warning { message: String },

    /// Run finished
    Finished { success: bool, state: String },
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - ConsoleEventSink: human-readable stage summaries
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PipelineEventSink {
    fn on_event(&self, event: PipelineEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}
