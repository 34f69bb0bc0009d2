//! Pipeline states

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    DeltaReady,
    ManifestParsed,
    Scanned,
    Neutralizing,
    Deploying,
    Done,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Init => "Init",
            PipelineState::DeltaReady => "DeltaReady",
            PipelineState::ManifestParsed => "ManifestParsed",
            PipelineState::Scanned => "Scanned",
            PipelineState::Neutralizing => "Neutralizing",
            PipelineState::Deploying => "Deploying",
            PipelineState::Done => "Done",
            PipelineState::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Whether `next` may follow `self`.
    ///
    /// `Failed` is reachable from every non-terminal state. `Done` follows
    /// `Deploying`, or `Scanned` in a dry run.
    pub fn can_advance_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Init, DeltaReady) => true,
            (DeltaReady, ManifestParsed) => true,
            (ManifestParsed, Scanned) => true,
            (Scanned, Neutralizing | Deploying | Done) => true,
            (Neutralizing, Deploying) => true,
            (Deploying, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
