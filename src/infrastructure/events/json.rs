//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use serde_json::json;

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn path(p: &Path) -> String {
    p.display().to_string()
}

/// JSON form of one event
pub fn event_json(event: &PipelineEvent) -> serde_json::Value {
    match event {
        PipelineEvent::DeltaReady {
            mode,
            additions_manifest,
            destructive_manifest,
        } => json!({
            "event": "delta_ready",
            "mode": mode.as_str(),
            "additions_manifest": path(additions_manifest),
            "destructive_manifest": destructive_manifest.as_deref().map(path),
        }),

        PipelineEvent::ManifestParsed { components } => json!({
            "event": "manifest_parsed",
            "components": components,
        }),

        PipelineEvent::Scanned { files } => json!({
            "event": "scanned",
            "matches": files
                .iter()
                .map(|(file, members)| json!({ "file": path(file), "members": members }))
                .collect::<Vec<_>>(),
        }),

        PipelineEvent::SnapshotAcquired { stashed } => json!({
            "event": "snapshot_acquired",
            "stashed": stashed,
        }),

        PipelineEvent::FileNeutralized { path: file, lines } => json!({
            "event": "file_neutralized",
            "path": path(file),
            "lines": lines,
        }),

        PipelineEvent::DeployStarted {
            target_org,
            destructive,
        } => json!({
            "event": "deploy_started",
            "target_org": target_org,
            "destructive": destructive,
        }),

        PipelineEvent::DeployFinished {
            success,
            diagnostic,
        } => json!({
            "event": "deploy_finished",
            "success": success,
            "diagnostic": diagnostic,
        }),

        PipelineEvent::Restored {
            files,
            reapplied_stash,
        } => json!({
            "event": "restored",
            "files": files,
            "reapplied_stash": reapplied_stash,
        }),

        PipelineEvent::Warning { message } => json!({
            "event": "warning",
            "message": message,
        }),

        PipelineEvent::Finished { success, state } => json!({
            "event": "finished",
            "success": success,
            "state": state,
        }),
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.write_event(event_json(&event));
    }
}
