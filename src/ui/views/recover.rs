use std::path::Path;

use defuse::application::RecoverReport;

use crate::ui::blocks::summary::ResultSummary;

fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

pub fn render_recover_report(
    report: &RecoverReport,
    root: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if !report.found {
        let mut summary = ResultSummary::success("Nothing to recover");
        summary.add_info("no unfinished run found");
        return summary.render(supports_color, supports_unicode);
    }

    let mut summary = if report.warnings.is_empty() {
        ResultSummary::success("Recovered")
    } else {
        ResultSummary::partial("Recovered with warnings")
    };
    summary.add_stat("file(s) restored", report.restored.len());
    summary.add_stat("file(s) revived in place", report.revived.len());
    for path in &report.restored {
        summary.add_info(rel(path, root));
    }
    if report.reapplied_stash {
        summary.add_info("local changes reapplied");
    }
    for warning in &report.warnings {
        summary.add_warning(warning.as_str());
    }
    if !report.revived.is_empty() {
        summary.with_next_step("Review revived files with `git diff`");
    }
    summary.render(supports_color, supports_unicode)
}

pub fn recover_json(report: &RecoverReport, root: &Path) -> serde_json::Value {
    serde_json::json!({
        "event": "recovered",
        "found": report.found,
        "restored": report.restored.iter().map(|p| rel(p, root)).collect::<Vec<_>>(),
        "revived": report
            .revived
            .iter()
            .map(|(p, lines)| serde_json::json!({ "file": rel(p, root), "lines": lines }))
            .collect::<Vec<_>>(),
        "reapplied_stash": report.reapplied_stash,
        "warnings": report.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn nothing_found() {
        let rendered =
            render_recover_report(&RecoverReport::default(), Path::new("/p"), false, false);
        assert!(rendered.contains("[OK] Nothing to recover"));
    }

    #[test]
    fn revived_files_get_review_hint() {
        let root = PathBuf::from("/p");
        let report = RecoverReport {
            found: true,
            revived: vec![(root.join("a.cls"), 2)],
            warnings: vec!["a.cls was edited".to_string()],
            ..Default::default()
        };
        let rendered = render_recover_report(&report, &root, false, false);
        assert!(rendered.contains("[WARN] Recovered with warnings"));
        assert!(rendered.contains("git diff"));

        let value = recover_json(&report, &root);
        assert_eq!(value["revived"][0]["file"], "a.cls");
        assert_eq!(value["revived"][0]["lines"], 2);
    }
}
