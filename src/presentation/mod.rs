//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! Rendering lives with the binary (`ui/`), which owns the terminal.

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, DeployArgs, ModeArg, TestLevelArg};
pub use factory::{create_delta_generator, create_deploy_engine, discover_project_root, Workspace};
