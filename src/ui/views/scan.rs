use std::path::Path;

use defuse::application::ScanReport;
use defuse::domain::services::{NeutralizedFile, Preview};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

pub fn render_scan_header(
    manifest: &Path,
    source_root: &Path,
    root: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Scan, "defuse scan");
    header.add("Manifest", rel(manifest, root));
    header.add("Source", rel(source_root, root));
    header.render(supports_color, supports_unicode)
}

/// Unified diff of every planned rewrite, colored by line kind
pub fn render_planned_diff(
    planned: &[NeutralizedFile],
    root: &Path,
    supports_color: bool,
) -> String {
    let preview = Preview::new();
    let mut out = String::new();
    for plan in planned {
        let original = String::from_utf8_lossy(&plan.original);
        let diff = preview.unified(&rel(&plan.path, root), &original, &plan.rewritten);
        for line in diff.lines() {
            let styled = if line.starts_with("+++") || line.starts_with("---") {
                ColoredText::dim(line).bold().render(supports_color)
            } else if line.starts_with('+') {
                ColoredText::success(line).render(supports_color)
            } else if line.starts_with('-') {
                ColoredText::error(line).render(supports_color)
            } else if line.starts_with("@@") {
                ColoredText::info(line).render(supports_color)
            } else {
                line.to_string()
            };
            out.push_str(&styled);
            out.push('\n');
        }
    }
    out
}

pub fn render_scan_report(
    report: &ScanReport,
    root: &Path,
    show_diff: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    for m in &report.matches {
        let members: Vec<&str> = m.members().iter().map(String::as_str).collect();
        out.push_str(&format!(
            "  {} {}\n",
            rel(m.file(), root),
            ColoredText::dim(format!("({})", members.join(", "))).render(supports_color)
        ));
    }

    if show_diff && !report.planned.is_empty() {
        out.push('\n');
        out.push_str(&render_planned_diff(&report.planned, root, supports_color));
    }

    let mut summary = if report.matches.is_empty() {
        ResultSummary::success("No dependents")
    } else {
        ResultSummary::partial("Dependents found")
    };
    summary.add_stat("component(s) in manifest", report.manifest.len());
    summary.add_stat("dependent file(s)", report.matches.len());
    summary.add_stat("line(s) would be disabled", report.disabled_line_count());
    if !report.matches.is_empty() && !show_diff {
        summary.with_next_step("Run with --diff to preview the neutralization");
    }
    out.push_str(&summary.render(supports_color, supports_unicode));
    out
}

pub fn scan_json(report: &ScanReport, root: &Path, show_diff: bool) -> serde_json::Value {
    let preview = Preview::new();
    let files: Vec<serde_json::Value> = report
        .matches
        .iter()
        .map(|m| {
            let plan = report.planned.iter().find(|p| p.path == m.file());
            let mut entry = serde_json::json!({
                "file": rel(m.file(), root),
                "members": m.members(),
                "lines": plan.map(|p| p.lines.clone()).unwrap_or_default(),
            });
            if let (true, Some(plan)) = (show_diff, plan) {
                let original = String::from_utf8_lossy(&plan.original);
                entry["diff"] = serde_json::Value::String(preview.unified(
                    &rel(&plan.path, root),
                    &original,
                    &plan.rewritten,
                ));
            }
            entry
        })
        .collect();

    serde_json::json!({
        "event": "scan",
        "components": report.manifest.components().iter().map(|c| c.name()).collect::<Vec<_>>(),
        "files": files,
        "disabled_lines": report.disabled_line_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use defuse::domain::entities::{DeletedComponent, DependencyMatch};
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn report(root: &Path) -> ScanReport {
        let file = root.join("classes/A.cls");
        let manifest = [DeletedComponent::new("Helper")].into_iter().collect();
        let members: BTreeSet<String> = ["Helper".to_string()].into_iter().collect();
        ScanReport {
            manifest,
            matches: vec![DependencyMatch::new(&file, members)],
            planned: vec![NeutralizedFile {
                path: file,
                original: b"a\nHelper.run();\n".to_vec(),
                rewritten: "a\n// defuse: Helper.run();\n".to_string(),
                lines: vec![2],
            }],
        }
    }

    #[test]
    fn lists_files_relative_to_root() {
        let root = PathBuf::from("/p");
        let rendered = render_scan_report(&report(&root), &root, false, false, false);
        assert!(rendered.contains("  classes/A.cls (Helper)\n"));
        assert!(rendered.contains("1 line(s) would be disabled"));
        assert!(rendered.contains("--diff"));
    }

    #[test]
    fn diff_shows_disabled_line() {
        let root = PathBuf::from("/p");
        let rendered = render_scan_report(&report(&root), &root, true, false, false);
        assert!(rendered.contains("-Helper.run();\n"));
        assert!(rendered.contains("+// defuse: Helper.run();\n"));
    }

    #[test]
    fn json_carries_lines_and_diff() {
        let root = PathBuf::from("/p");
        let value = scan_json(&report(&root), &root, true);
        assert_eq!(value["components"][0], "Helper");
        assert_eq!(value["files"][0]["file"], "classes/A.cls");
        assert_eq!(value["files"][0]["lines"][0], 2);
        assert!(value["files"][0]["diff"].as_str().unwrap().contains("@@"));
    }
}
