use std::path::Path;

use defuse::application::{PipelineOptions, PipelineReport};
use defuse::domain::value_objects::DeltaMode;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::scan::render_planned_diff;

fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

pub fn render_deploy_header(
    options: &PipelineOptions,
    root: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if options.dry_run {
        "defuse deploy (dry run)"
    } else {
        "defuse deploy"
    };
    let mut header = CommandHeader::new(Icon::Deploy, title);
    header.add("Org", options.deployment.target_org.as_str());
    match options.mode {
        DeltaMode::GitDiff => header.add("Delta", format!("{}..{}", options.base, options.head)),
        DeltaMode::OrgSnapshot => header.add("Delta", "org snapshot"),
    }
    header.add("Source", rel(&options.source_root, root));
    header.add("Tests", options.deployment.test_level.as_str());
    header.render(supports_color, supports_unicode)
}

pub fn render_deploy_summary(
    report: &PipelineReport,
    root: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if report.dry_run && report.error.is_none() {
        return render_dry_run(report, root, supports_color, supports_unicode);
    }

    let mut summary = if report.is_success() && report.warnings.is_empty() {
        ResultSummary::success("Deploy Complete")
    } else if report.is_success() {
        ResultSummary::partial("Deploy Complete")
    } else {
        ResultSummary::failure("Deploy Failed")
    };

    summary.add_stat("component(s) deleted", report.components.len());
    summary.add_stat("file(s) neutralized", report.neutralized.len());
    summary.add_stat("line(s) disabled", report.disabled_line_count());
    if !report.neutralized.is_empty() {
        summary.add_info(format!("{} file(s) restored", report.restored));
    }
    if report.reapplied_stash {
        summary.add_info("local changes reapplied");
    }
    for warning in &report.warnings {
        summary.add_warning(warning.as_str());
    }
    if report.restored < report.neutralized.len() {
        summary.with_next_step("Run `defuse recover` to restore the remaining files");
    }

    summary.render(supports_color, supports_unicode)
}

fn render_dry_run(
    report: &PipelineReport,
    root: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    if !report.planned.is_empty() {
        out.push('\n');
        out.push_str(&render_planned_diff(&report.planned, root, supports_color));
    }

    let mut summary = ResultSummary::success("Dry Run Complete");
    summary.add_stat("component(s) in manifest", report.components.len());
    summary.add_stat("file(s) would be neutralized", report.planned.len());
    summary.add_stat(
        "line(s) would be disabled",
        report.planned.iter().map(|p| p.lines.len()).sum(),
    );
    summary.add_info("nothing was changed or deployed");
    summary.with_next_step("Run again without --dry-run to deploy");
    out.push_str(&summary.render(supports_color, supports_unicode));
    out
}
