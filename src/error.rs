//! Error types for defuse
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for defuse operations
pub type DefuseResult<T> = Result<T, DefuseError>;

/// Coarse classification of a [`DefuseError`].
///
/// Callers branch on the kind (exit codes, JSON output) rather than
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ManifestParse,
    DeltaGenerationFailed,
    RestoreConflict,
    DeploymentFailed,
    Config,
    Tool,
    Vcs,
    Journal,
    Interrupted,
    Io,
}

impl ErrorKind {
    /// Whether the error aborts the run.
    ///
    /// Only a restore conflict is surfaced as a warning.
    pub fn is_fatal(self) -> bool {
        !matches!(self, ErrorKind::RestoreConflict)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ManifestParse => "manifest_parse",
            ErrorKind::DeltaGenerationFailed => "delta_generation_failed",
            ErrorKind::RestoreConflict => "restore_conflict",
            ErrorKind::DeploymentFailed => "deployment_failed",
            ErrorKind::Config => "config",
            ErrorKind::Tool => "tool",
            ErrorKind::Vcs => "vcs",
            ErrorKind::Journal => "journal",
            ErrorKind::Interrupted => "interrupted",
            ErrorKind::Io => "io",
        }
    }
}

/// Main error type for defuse operations
#[derive(Error, Debug)]
pub enum DefuseError {
    /// Deletion manifest exists but cannot be parsed
    #[error("malformed deletion manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The delta generator failed or produced no additions manifest
    #[error("delta generation failed: {message}")]
    DeltaGenerationFailed { message: String },

    /// Local modifications could not be reapplied after restoration
    #[error("could not reapply local changes ({stash}): {message}; reconcile manually with `git stash list`")]
    RestoreConflict { stash: String, message: String },

    /// The deployment engine reported failure
    #[error("deployment to '{target_org}' failed{}", exit_suffix(.exit_code))]
    DeploymentFailed {
        target_org: String,
        exit_code: Option<i32>,
        diagnostic: String,
    },

    /// Invalid configuration
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A required setting has no value from flags, env or config
    #[error("missing required setting '{key}' (pass --{flag} or set {env})")]
    MissingSetting {
        key: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    /// An external program could not be started
    #[error("failed to run '{program}': {message}")]
    Tool { program: String, message: String },

    /// A version-control operation failed
    #[error("git {operation} failed: {message}")]
    Vcs { operation: String, message: String },

    /// The recovery journal could not be written or read
    #[error("recovery journal {path}: {message}")]
    Journal { path: PathBuf, message: String },

    /// Another run holds the working tree
    #[error("another defuse run is active on this working tree (lock: {lock})")]
    Busy { lock: PathBuf },

    /// A termination signal was trapped
    #[error("interrupted; the working tree was restored")]
    Interrupted,

    /// IO error on a specific file
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (exit code {})", c))
        .unwrap_or_default()
}

impl DefuseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DefuseError::ManifestParse { .. } => ErrorKind::ManifestParse,
            DefuseError::DeltaGenerationFailed { .. } => ErrorKind::DeltaGenerationFailed,
            DefuseError::RestoreConflict { .. } => ErrorKind::RestoreConflict,
            DefuseError::DeploymentFailed { .. } => ErrorKind::DeploymentFailed,
            DefuseError::Config { .. } | DefuseError::MissingSetting { .. } => ErrorKind::Config,
            DefuseError::Tool { .. } => ErrorKind::Tool,
            DefuseError::Vcs { .. } | DefuseError::Busy { .. } => ErrorKind::Vcs,
            DefuseError::Journal { .. } => ErrorKind::Journal,
            DefuseError::Interrupted => ErrorKind::Interrupted,
            DefuseError::File { .. } | DefuseError::Io(_) => ErrorKind::Io,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Interrupted => 130,
            _ => 1,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DefuseError::File {
            path: path.into(),
            source,
        }
    }
}
