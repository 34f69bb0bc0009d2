use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Deploy,
    Scan,
    Diff,
    Neutralize,
    Restore,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        if supports_unicode {
            match self {
                Icon::Success => theme::icons::SUCCESS,
                Icon::Error => theme::icons::ERROR,
                Icon::Warning => theme::icons::WARNING,
                Icon::Progress => theme::icons::PROGRESS,
                Icon::Arrow => theme::icons::ARROW,
                Icon::Deploy => theme::icons::DEPLOY,
                Icon::Scan => theme::icons::SCAN,
                Icon::Diff => theme::icons::DIFF,
                Icon::Neutralize => theme::icons::NEUTRALIZE,
                Icon::Restore => theme::icons::RESTORE,
            }
        } else {
            match self {
                Icon::Success => theme::icons_ascii::SUCCESS,
                Icon::Error => theme::icons_ascii::ERROR,
                Icon::Warning => theme::icons_ascii::WARNING,
                Icon::Progress => theme::icons_ascii::PROGRESS,
                Icon::Arrow => theme::icons_ascii::ARROW,
                Icon::Deploy => theme::icons_ascii::DEPLOY,
                Icon::Scan => theme::icons_ascii::SCAN,
                Icon::Diff => theme::icons_ascii::DIFF,
                Icon::Neutralize => theme::icons_ascii::NEUTRALIZE,
                Icon::Restore => theme::icons_ascii::RESTORE,
            }
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success | Icon::Restore => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress | Icon::Neutralize => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Deploy | Icon::Scan | Icon::Diff => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
