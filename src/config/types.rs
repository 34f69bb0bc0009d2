//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::ScanOptions;
use crate::domain::value_objects::{DeltaMode, IgnorePatterns, TestLevel};
use crate::error::{DefuseError, DefuseResult};

use super::loader::{self, ConfigWarning};

/// Source tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Tree that is scanned and mutated, relative to the project root
    #[serde(default = "default_source_root")]
    pub root: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_source_root(),
        }
    }
}

fn default_source_root() -> PathBuf {
    PathBuf::from("force-app")
}

/// Scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanConfig {
    /// Extensions to scan, without the dot; empty scans every text file
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Delta generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaConfig {
    #[serde(default)]
    pub mode: DeltaMode,

    #[serde(default = "default_base")]
    pub base: String,

    #[serde(default = "default_head")]
    pub head: String,

    /// Where the manifests are written; a temporary directory when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            mode: DeltaMode::default(),
            base: default_base(),
            head: default_head(),
            output_dir: None,
        }
    }
}

fn default_base() -> String {
    "HEAD~1".to_string()
}

fn default_head() -> String {
    "HEAD".to_string()
}

/// Deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub target_org: Option<String>,

    #[serde(default)]
    pub test_level: TestLevel,

    #[serde(default = "default_wait_minutes")]
    pub wait_minutes: u32,

    /// API version written into generated manifests
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            target_org: None,
            test_level: TestLevel::default(),
            wait_minutes: default_wait_minutes(),
            api_version: default_api_version(),
        }
    }
}

fn default_wait_minutes() -> u32 {
    33
}

fn default_api_version() -> String {
    "60.0".to_string()
}

/// Handling of local modifications during neutralization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_true")]
    pub stash: bool,

    #[serde(default = "default_true")]
    pub include_untracked: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            stash: true,
            include_untracked: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// External programs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_sf")]
    pub sf: String,

    #[serde(default = "default_git")]
    pub git: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            sf: default_sf(),
            git: default_git(),
        }
    }
}

fn default_sf() -> String {
    "sf".to_string()
}

fn default_git() -> String {
    "git".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub delta: DeltaConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DefuseResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DefuseResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Merge user config, project config and `DEFUSE_*` variables.
    pub fn load_layered(project_root: &Path) -> DefuseResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(project_root, loader::user_config_path().as_deref())
    }

    /// Apply `DEFUSE_*` environment variable overrides
    pub fn with_env_overrides(self) -> DefuseResult<Self> {
        loader::apply_env(self, |key| std::env::var(key).ok())
    }

    /// Scanner options for `source_root`, including its `.defuseignore`
    pub fn scan_options(&self, source_root: &Path) -> DefuseResult<ScanOptions> {
        let ignore = IgnorePatterns::load(source_root).map_err(|e| DefuseError::Config {
            file: source_root.join(crate::domain::value_objects::IGNORE_FILE_NAME),
            message: e.to_string(),
        })?;
        let extensions = self
            .scan
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Ok(ScanOptions { ignore, extensions })
    }
}
