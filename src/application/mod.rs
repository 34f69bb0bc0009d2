//! Application Layer
//!
//! Use cases that orchestrate the neutralization flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PipelineUseCase` - Delta, scan, neutralize, deploy, restore
//! - `ScanUseCase` - Manifest and scan only (`defuse scan`, dry runs)
//! - `RecoverUseCase` - Undo a run that died holding the tree
//!
//! ## Services
//!
//! - `SnapshotGuard` - Scoped ownership of the mutated tree
//! - `DeploymentOrchestrator` - Builds and submits the deploy request

pub mod orchestrator;
pub mod pipeline;
pub mod recover;
pub mod scan;
pub mod snapshot;

pub use orchestrator::{DeploymentOrchestrator, DeploymentSettings};
pub use pipeline::{PipelineOptions, PipelinePorts, PipelineReport, PipelineState, PipelineUseCase};
pub use recover::{RecoverReport, RecoverUseCase};
pub use scan::{plan_neutralization, ScanReport, ScanUseCase};
pub use snapshot::{ReleaseReport, SnapshotGuard, SnapshotOptions};
