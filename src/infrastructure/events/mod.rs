//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The human-readable sink lives with the terminal UI in the binary.

mod json;

pub use json::{event_json, JsonEventSink};
