//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temporary file in the same directory followed by a
/// rename, so a reader never sees a half-written source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        let permissions = std::fs::metadata(path).ok().map(|m| m.permissions());

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        tmp.write_all(content).map_err(|e| FsError::at(path, e))?;
        tmp.as_file().sync_all().map_err(|e| FsError::at(path, e))?;
        if let Some(permissions) = permissions {
            std::fs::set_permissions(tmp.path(), permissions).map_err(|e| FsError::at(path, e))?;
        }
        tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn walk(&self, root: &Path) -> FsResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(FsError::NotFound(root.to_path_buf()));
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}
