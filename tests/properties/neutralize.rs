//! Property tests for line neutralization and revival.

use std::collections::BTreeSet;

use proptest::prelude::*;

use defuse::domain::services::{neutralize_text, revive_text};
use defuse::domain::value_objects::CommentStyle;

const NAMES: &[&str] = &["AccountHelper", "Util", "Invoice__c"];

fn plain() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _.(){};='\t]{0,40}").unwrap()
}

/// A source line that never looks disabled already ('/' and '<' excluded)
fn source_line() -> impl Strategy<Value = String> {
    (plain(), prop::option::of(prop::sample::select(NAMES)), plain())
        .prop_map(|(head, name, tail)| match name {
            Some(name) => format!("{}{}{}", head, name, tail),
            None => head,
        })
}

/// Lines joined with a mix of LF and CRLF, with or without a final newline
fn source_text() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec((source_line(), any::<bool>()), 0..=12),
        any::<bool>(),
    )
        .prop_map(|(lines, trailing)| {
            let mut text = String::new();
            let count = lines.len();
            for (idx, (line, crlf)) in lines.into_iter().enumerate() {
                text.push_str(&line);
                if idx + 1 < count || trailing {
                    text.push_str(if crlf { "\r\n" } else { "\n" });
                }
            }
            text
        })
}

fn style() -> impl Strategy<Value = CommentStyle> {
    prop::sample::select(vec![
        CommentStyle::Line("//"),
        CommentStyle::Block("<!--", "-->"),
        CommentStyle::Block("/*", "*/"),
    ])
}

fn names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::sample::subsequence(NAMES, 0..=NAMES.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: reviving a neutralized text yields the original text exactly.
    #[test]
    fn property_revive_inverts_neutralize(
        text in source_text(),
        names in names(),
        style in style(),
    ) {
        let (neutralized, disabled) = neutralize_text(&text, &names, style);
        let (revived, count) = revive_text(&neutralized, style);

        prop_assert_eq!(revived, text);
        prop_assert_eq!(count, disabled.len());
    }

    /// PROPERTY: neutralizing twice disables nothing more.
    #[test]
    fn property_neutralize_is_idempotent(
        text in source_text(),
        names in names(),
        style in style(),
    ) {
        let (once, _) = neutralize_text(&text, &names, style);
        let (twice, disabled) = neutralize_text(&once, &names, style);

        prop_assert_eq!(twice, once);
        prop_assert!(disabled.is_empty());
    }

    /// PROPERTY: exactly the lines mentioning a name are disabled, and the
    /// line count and terminators are unchanged.
    #[test]
    fn property_only_referencing_lines_are_disabled(
        text in source_text(),
        names in names(),
        style in style(),
    ) {
        let (neutralized, disabled) = neutralize_text(&text, &names, style);

        let before: Vec<&str> = text.split_inclusive('\n').collect();
        let after: Vec<&str> = neutralized.split_inclusive('\n').collect();
        prop_assert_eq!(before.len(), after.len());

        for (idx, (old, new)) in before.iter().zip(&after).enumerate() {
            let mentions = names.iter().any(|n| old.contains(n.as_str()));
            prop_assert_eq!(disabled.contains(&(idx + 1)), mentions);
            prop_assert_eq!(style.is_disabled(new.trim_end_matches(['\r', '\n'])), mentions);
            prop_assert_eq!(old.ends_with("\r\n"), new.ends_with("\r\n"));
            prop_assert_eq!(old.ends_with('\n'), new.ends_with('\n'));
        }
    }
}
