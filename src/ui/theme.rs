use crossterm::style::Color;

/// Design tokens for the defuse CLI.
///
/// Every color, icon and separator used by the UI comes from here.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const ARROW: &str = "↳";

    // Pipeline stages.
    pub const DEPLOY: &str = "📦";
    pub const SCAN: &str = "🔍";
    pub const DIFF: &str = "Δ";
    pub const NEUTRALIZE: &str = "⊘";
    pub const RESTORE: &str = "↺";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const ARROW: &str = "[>]";

    pub const DEPLOY: &str = "[DEPLOY]";
    pub const SCAN: &str = "[SCAN]";
    pub const DIFF: &str = "[DIFF]";
    pub const NEUTRALIZE: &str = "[OFF]";
    pub const RESTORE: &str = "[UNDO]";
}

/// Horizontal rule under summary titles
pub fn rule(unicode: bool, width: usize) -> String {
    let piece = if unicode { "─" } else { "-" };
    piece.repeat(width)
}
