//! Neutralization preview
//!
//! Renders what the neutralizer would change as a unified diff, for
//! `defuse scan --diff` and the dry-run report.

use similar::{ChangeTag, TextDiff};

/// Line counts of a rendered preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStats {
    pub additions: usize,
    pub deletions: usize,
}

impl PreviewStats {
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Preview;

impl Preview {
    pub fn new() -> Self {
        Self
    }

    /// Unified diff between the current and neutralized content
    pub fn unified(&self, label: &str, old: &str, new: &str) -> String {
        TextDiff::from_lines(old, new)
            .unified_diff()
            .context_radius(1)
            .header(&format!("a/{label}"), &format!("b/{label}"))
            .to_string()
    }

    pub fn stats(&self, old: &str, new: &str) -> PreviewStats {
        let mut stats = PreviewStats::default();
        for change in TextDiff::from_lines(old, new).iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => stats.additions += 1,
                ChangeTag::Delete => stats.deletions += 1,
                ChangeTag::Equal => {}
            }
        }
        stats
    }
}
