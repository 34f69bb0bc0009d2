//! Pipeline Module
//!
//! One run: delta, manifest, scan, guarded neutralization, deployment,
//! restoration.
//!
//! ## Structure
//!
//! - `options` - Run parameters (`PipelineOptions`)
//! - `state` - Run states and legal transitions (`PipelineState`)
//! - `result` - Run outcome (`PipelineReport`)
//! - `use_case` - The run itself (`PipelineUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use defuse::application::pipeline::{PipelinePorts, PipelineUseCase};
//!
//! let report = PipelineUseCase::new(ports).execute(&options, &sink);
//! ```

mod options;
mod result;
mod state;
mod use_case;

pub use options::PipelineOptions;
pub use result::PipelineReport;
pub use state::PipelineState;
pub use use_case::{PipelinePorts, PipelineUseCase};
