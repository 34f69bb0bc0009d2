//! Comment syntax used to disable a line
//!
//! A disabled line keeps the original text verbatim between the opening
//! token plus [`DISABLED_MARKER`] and the closing token, so it can be
//! revived without knowing anything about the language.

use std::path::Path;

/// Tag written after the comment opener of every disabled line
pub const DISABLED_MARKER: &str = "defuse: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// text`
    Line(&'static str),
    /// `<!-- text -->`, `/* text */`
    Block(&'static str, &'static str),
}

impl CommentStyle {
    /// Pick the comment syntax for a source file from its name.
    ///
    /// `Foo.cls-meta.xml` and `Foo.object` are markup; Apex, JavaScript and
    /// unknown extensions use `//`.
    pub fn for_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let ext = name.rsplit('.').next().unwrap_or("");

        match ext {
            "xml" | "page" | "component" | "cmp" | "app" | "evt" | "intf" | "design"
            | "auradoc" | "html" | "svg" | "object" | "email" => Self::Block("<!--", "-->"),
            "css" => Self::Block("/*", "*/"),
            _ => Self::Line("//"),
        }
    }

    fn opener(&self) -> &'static str {
        match self {
            Self::Line(open) | Self::Block(open, _) => open,
        }
    }

    fn closer(&self) -> &'static str {
        match self {
            Self::Line(_) => "",
            Self::Block(_, close) => close,
        }
    }

    /// Disabled form of a line body (no line terminator)
    pub fn disable(&self, line: &str) -> String {
        match self {
            Self::Line(open) => format!("{} {}{}", open, DISABLED_MARKER, line),
            Self::Block(open, close) => format!("{} {}{} {}", open, DISABLED_MARKER, line, close),
        }
    }

    /// Recover the original body of a disabled line
    pub fn revive<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line
            .strip_prefix(self.opener())?
            .strip_prefix(' ')?
            .strip_prefix(DISABLED_MARKER)?;
        match self {
            Self::Line(_) => Some(rest),
            Self::Block(..) => rest
                .strip_suffix(self.closer())
                .and_then(|r| r.strip_suffix(' ')),
        }
    }

    pub fn is_disabled(&self, line: &str) -> bool {
        self.revive(line).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_follows_file_type() {
        assert_eq!(
            CommentStyle::for_path(Path::new("classes/A.cls")),
            CommentStyle::Line("//")
        );
        assert_eq!(
            CommentStyle::for_path(Path::new("triggers/T.trigger")),
            CommentStyle::Line("//")
        );
        assert_eq!(
            CommentStyle::for_path(Path::new("classes/A.cls-meta.xml")),
            CommentStyle::Block("<!--", "-->")
        );
        assert_eq!(
            CommentStyle::for_path(Path::new("lwc/card/card.css")),
            CommentStyle::Block("/*", "*/")
        );
        assert_eq!(
            CommentStyle::for_path(Path::new("lwc/card/card.js")),
            CommentStyle::Line("//")
        );
    }

    #[test]
    fn line_comment_disable_and_revive() {
        let style = CommentStyle::Line("//");
        let disabled = style.disable("    Helper.run();");
        assert_eq!(disabled, "// defuse:     Helper.run();");
        assert_eq!(style.revive(&disabled), Some("    Helper.run();"));
    }

    #[test]
    fn block_comment_disable_and_revive() {
        let style = CommentStyle::Block("<!--", "-->");
        let disabled = style.disable("<members>Foo</members>");
        assert_eq!(disabled, "<!-- defuse: <members>Foo</members> -->");
        assert_eq!(style.revive(&disabled), Some("<members>Foo</members>"));
    }

    #[test]
    fn ordinary_comment_is_not_disabled() {
        let style = CommentStyle::Line("//");
        assert!(!style.is_disabled("// regular comment"));
        assert!(!style.is_disabled("Helper.run(); // defuse: trailing"));
        assert!(style.is_disabled("// defuse: Helper.run();"));
    }
}
