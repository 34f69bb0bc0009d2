//! Property tests for snapshot restore.

use std::collections::BTreeSet;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;

use defuse::application::{SnapshotGuard, SnapshotOptions};
use defuse::domain::services::SourceNeutralizer;
use defuse::infrastructure::{JsonJournalStore, LocalFs, PlainTree};

const NAME: &str = "AccountHelper";

fn file_body() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        proptest::string::string_regex("[A-Za-z0-9 _.();{}]{0,30}").unwrap(),
        Just(format!("    {}.run();", NAME)),
        Just("<field>AccountHelper</field>".to_string()),
    ];
    (proptest::collection::vec(line, 0..=10), prop_oneof![Just("\n"), Just("\r\n")])
        .prop_map(|(lines, eol)| lines.iter().map(|l| format!("{}{}", l, eol)).collect())
}

fn files() -> impl Strategy<Value = Vec<(String, String)>> {
    let ext = prop_oneof![Just("cls"), Just("trigger"), Just("flow-meta.xml"), Just("css")];
    proptest::collection::vec((ext, file_body()), 1..=5).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, (ext, body))| (format!("src/F{}.{}", idx, ext), body))
            .collect()
    })
}

/// Neutralize every file in one guarded episode and release it
fn episode(root: &TempDir, paths: &[PathBuf]) -> Vec<Vec<u8>> {
    let fs = LocalFs::new();
    let tree = PlainTree::new(root.path());
    let journal = JsonJournalStore::new(&root.path().join(".defuse"));
    let options = SnapshotOptions {
        stash: false,
        include_untracked: false,
    };
    let names: BTreeSet<String> = [NAME.to_string()].into_iter().collect();

    let mut guard = SnapshotGuard::acquire(&fs, &tree, &journal, options, &[]).unwrap();
    let mut during = Vec::new();
    for path in paths {
        let content = std::fs::read(path).unwrap();
        if let Some(plan) = SourceNeutralizer::new().neutralize(path, &content, &names) {
            guard.apply(plan).unwrap();
        }
        during.push(std::fs::read(path).unwrap());
    }
    let release = guard.release();
    assert!(release.is_complete());
    during
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after release every file is byte-identical to before.
    #[test]
    fn property_release_restores_bytes(files in files()) {
        let root = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (rel, body) in &files {
            let path = root.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, body).unwrap();
            paths.push(path);
        }

        let during = episode(&root, &paths);

        for ((path, (_, body)), seen) in paths.iter().zip(&files).zip(&during) {
            prop_assert_eq!(std::fs::read(path).unwrap(), body.as_bytes());
            let mentions = body.contains(NAME);
            prop_assert_eq!(seen.as_slice() != body.as_bytes(), mentions);
        }
        prop_assert!(!root.path().join(".defuse/journal.json").exists());
    }

    /// PROPERTY: a second episode sees exactly what the first one saw.
    #[test]
    fn property_episodes_repeat_identically(files in files()) {
        let root = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (rel, body) in &files {
            let path = root.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, body).unwrap();
            paths.push(path);
        }

        let first = episode(&root, &paths);
        let second = episode(&root, &paths);

        prop_assert_eq!(first, second);
        for (path, (_, body)) in paths.iter().zip(&files) {
            prop_assert_eq!(std::fs::read(path).unwrap(), body.as_bytes());
        }
    }
}
