//! Configuration loading and layering

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::value_objects::{DeltaMode, TestLevel};
use crate::error::{DefuseError, DefuseResult};

use super::types::Config;

/// Project configuration file, at the project root
pub const PROJECT_CONFIG_FILE: &str = "defuse.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DefuseResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| DefuseError::file(path, e))?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> DefuseResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| config_error(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Merge the user config, then the project config, then `DEFUSE_*`.
///
/// Later layers override earlier ones key by key; absent files are skipped.
pub fn load_layered(
    project_root: &Path,
    user_config: Option<&Path>,
) -> DefuseResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();
    let mut last_file = project_config.clone();

    for path in [user_config, Some(project_config.as_path())].into_iter().flatten() {
        if !path.is_file() {
            continue;
        }
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path).map_err(|e| DefuseError::file(path, e))?;
        let (_, file_warnings) = parse_with_warnings(&content, path)?;
        warnings.extend(file_warnings);

        let table: toml::Table = toml::from_str(&content).map_err(|e| config_error(path, e))?;
        merge_tables(&mut merged, table);
        last_file = path.to_path_buf();
    }

    let config: Config = toml::Value::Table(merged)
        .try_into()
        .map_err(|e| config_error(&last_file, e))?;
    let config = apply_env(config, |key| std::env::var(key).ok())?;
    Ok((config, warnings))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming)
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply environment overrides (DEFUSE_* prefix) read through `lookup`
pub fn apply_env<F>(mut config: Config, lookup: F) -> DefuseResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(org) = var("DEFUSE_TARGET_ORG") {
        config.deploy.target_org = Some(org);
    }

    if let Some(mode) = var("DEFUSE_MODE") {
        config.delta.mode = mode
            .parse::<DeltaMode>()
            .map_err(|message| env_error("DEFUSE_MODE", message))?;
    }

    if let Some(level) = var("DEFUSE_TEST_LEVEL") {
        config.deploy.test_level = level
            .parse::<TestLevel>()
            .map_err(|message| env_error("DEFUSE_TEST_LEVEL", message))?;
    }

    if let Some(root) = var("DEFUSE_SOURCE_ROOT") {
        config.source.root = PathBuf::from(root);
    }

    if let Some(sf) = var("DEFUSE_SF_BIN") {
        config.tools.sf = sf;
    }

    if let Some(git) = var("DEFUSE_GIT_BIN") {
        config.tools.git = git;
    }

    Ok(config)
}

/// `$XDG_CONFIG_HOME/defuse/config.toml`, falling back to the platform config dir
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("defuse").join("config.toml"))
}

fn config_error(path: &Path, err: impl fmt::Display) -> DefuseError {
    DefuseError::Config {
        file: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn env_error(var: &str, message: String) -> DefuseError {
    DefuseError::Config {
        file: PathBuf::from(format!("${}", var)),
        message,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "source",
        "root",
        "scan",
        "extensions",
        "delta",
        "mode",
        "base",
        "head",
        "output_dir",
        "deploy",
        "target_org",
        "test_level",
        "wait_minutes",
        "api_version",
        "snapshot",
        "stash",
        "include_untracked",
        "tools",
        "sf",
        "git",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}
