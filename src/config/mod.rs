//! Configuration module for defuse
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DEFUSE_*)
//! 3. Project config (defuse.toml)
//! 4. User config ($XDG_CONFIG_HOME/defuse/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{apply_env, load_layered, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    ColorMode, Config, DeltaConfig, DeployConfig, OutputConfig, ScanConfig, SnapshotConfig,
    SourceConfig, ToolsConfig,
};
