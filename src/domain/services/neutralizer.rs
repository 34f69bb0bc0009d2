//! Source Neutralizer
//!
//! Rewrites every line that mentions a deleted component into a disabled
//! comment carrying the original text. The rewrite is computed here; the
//! snapshot guard records the original and performs the write.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::CommentStyle;

/// Rewritten content for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeutralizedFile {
    pub path: PathBuf,
    pub original: Vec<u8>,
    pub rewritten: String,
    /// 1-based line numbers that were disabled
    pub lines: Vec<usize>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SourceNeutralizer;

impl SourceNeutralizer {
    pub fn new() -> Self {
        Self
    }

    /// Compute the neutralized form of `content`.
    ///
    /// Returns `None` when the file is not UTF-8 or no line needs disabling
    /// (for instance because local changes were stashed away since the
    /// scan).
    pub fn neutralize(
        &self,
        path: &Path,
        content: &[u8],
        names: &BTreeSet<String>,
    ) -> Option<NeutralizedFile> {
        let text = std::str::from_utf8(content).ok()?;
        let style = CommentStyle::for_path(path);
        let (rewritten, lines) = neutralize_text(text, names, style);
        if lines.is_empty() {
            return None;
        }
        Some(NeutralizedFile {
            path: path.to_path_buf(),
            original: content.to_vec(),
            rewritten,
            lines,
        })
    }
}

/// Disable every line containing one of `names`.
///
/// Each line is visited once and tested against all names together, so the
/// result does not depend on name order and a line is never wrapped twice.
/// Lines that are already disabled are left alone. Line terminators are
/// preserved exactly.
pub fn neutralize_text(
    text: &str,
    names: &BTreeSet<String>,
    style: CommentStyle,
) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(text.len() + 64);
    let mut disabled = Vec::new();

    for (idx, raw) in text.split_inclusive('\n').enumerate() {
        let (body, eol) = split_eol(raw);
        if !style.is_disabled(body) && names.iter().any(|n| body.contains(n.as_str())) {
            out.push_str(&style.disable(body));
            disabled.push(idx + 1);
        } else {
            out.push_str(body);
        }
        out.push_str(eol);
    }

    (out, disabled)
}

/// Textual inverse of [`neutralize_text`]: revive every disabled line.
pub fn revive_text(text: &str, style: CommentStyle) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut revived = 0;

    for raw in text.split_inclusive('\n') {
        let (body, eol) = split_eol(raw);
        match style.revive(body) {
            Some(original) => {
                out.push_str(original);
                revived += 1;
            }
            None => out.push_str(body),
        }
        out.push_str(eol);
    }

    (out, revived)
}

fn split_eol(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
