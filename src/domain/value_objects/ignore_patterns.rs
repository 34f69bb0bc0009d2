//! Scan exclusions
//!
//! A `.defuseignore` file at the source root lists paths (gitignore syntax)
//! the dependency scanner must never report, e.g. fixtures that mention a
//! deleted component on purpose.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const IGNORE_FILE_NAME: &str = ".defuseignore";

const MAX_FILE_SIZE: u64 = 64 * 1024;

/// Compiled `.defuseignore` patterns
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Option<Gitignore>,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// A pattern set that excludes nothing
    pub fn empty() -> Self {
        Self {
            matcher: None,
            pattern_count: 0,
        }
    }

    /// Load `<source_root>/.defuseignore`; a missing file yields the empty set.
    pub fn load(source_root: &Path) -> Result<Self, IgnoreError> {
        let ignore_path = source_root.join(IGNORE_FILE_NAME);
        let metadata = match fs::metadata(&ignore_path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::empty()),
            Err(e) => return Err(IgnoreError::Io(ignore_path, e)),
        };
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
            });
        }

        let content =
            fs::read_to_string(&ignore_path).map_err(|e| IgnoreError::Io(ignore_path.clone(), e))?;
        Self::from_content(source_root, &ignore_path, &content)
    }

    pub fn from_content(
        root: &Path,
        source_path: &Path,
        content: &str,
    ) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(Some(source_path.to_path_buf()), line)
                .map_err(|e| IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: idx + 1,
                    message: e.to_string(),
                })?;
            pattern_count += 1;
        }

        if pattern_count == 0 {
            return Ok(Self::empty());
        }

        let matcher = builder.build().map_err(|e| IgnoreError::InvalidPattern {
            path: source_path.to_path_buf(),
            line: 0,
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher: Some(matcher),
            pattern_count,
        })
    }

    /// Whether a path relative to the source root is excluded
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        match &self.matcher {
            Some(matcher) => matcher
                .matched_path_or_any_parents(rel_path, is_dir)
                .is_ignore(),
            None => false,
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("{} exceeds {}KB ({size} bytes): {path}", IGNORE_FILE_NAME, MAX_FILE_SIZE / 1024)]
    FileTooLarge { path: PathBuf, size: u64 },

    #[error("invalid pattern at {path}:{line}: {message}")]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("cannot read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}
