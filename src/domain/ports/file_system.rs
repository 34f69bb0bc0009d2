//! FileSystem port - abstraction over file I/O operations
//!
//! Scanner, neutralizer and snapshot guard only touch files through this
//! trait, so they work the same against a temporary tree in tests.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error on a known path
    Io(PathBuf, std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Attach the path an `io::Error` happened on
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(path.to_path_buf(), err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

impl From<FsError> for crate::error::DefuseError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(path) => crate::error::DefuseError::file(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            ),
            FsError::PermissionDenied(path) => crate::error::DefuseError::file(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            ),
            FsError::Io(path, source) => crate::error::DefuseError::file(path, source),
            FsError::Other(msg) => crate::error::DefuseError::Io(std::io::Error::other(msg)),
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
pub trait FileSystem {
    /// Read raw file content
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Replace file content atomically, keeping the file's permissions
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Every regular, non-hidden file under `root`, sorted by path
    fn walk(&self, root: &Path) -> FsResult<Vec<PathBuf>>;
}
