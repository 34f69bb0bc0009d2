//! Common test utilities for defuse integration and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated Salesforce DX project with a fake `sf` tool
//! - Assertion macros: `assert_file_eq!`, `assert_output_contains!`
//! - Fixtures: reusable source and manifest content

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
