use defuse::{DefuseError, ErrorKind};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::detect_capabilities;

/// What the operator should do about `err`, when there is something to do
fn hint(err: &DefuseError) -> Option<&'static str> {
    match err {
        DefuseError::Journal { .. } => {
            Some("Run `defuse recover` to restore the files of the unfinished run")
        }
        DefuseError::Busy { .. } => Some("Wait for the other run to finish"),
        DefuseError::RestoreConflict { .. } => {
            Some("Resolve the conflict, then `git stash drop` the defuse entry")
        }
        DefuseError::MissingSetting { .. } => Some("Set it in defuse.toml to avoid repeating it"),
        DefuseError::DeltaGenerationFailed { .. } => {
            Some("Check that the sfdx-git-delta plugin is installed: `sf plugins`")
        }
        DefuseError::Tool { .. } => Some("Check that the program is installed and on PATH"),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).bold().render(supports_color)
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }

    let defuse_err = err.downcast_ref::<DefuseError>();
    if let Some(DefuseError::DeploymentFailed { diagnostic, .. }) = defuse_err {
        for line in diagnostic.lines().filter(|l| !l.trim().is_empty()).take(20) {
            out.push_str(&format!("  {}\n", ColoredText::dim(line).render(supports_color)));
        }
    }
    if let Some(hint) = defuse_err.and_then(hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            hint
        ));
    }
    out
}

pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let kind = err
        .downcast_ref::<DefuseError>()
        .map(|e| e.kind())
        .map(ErrorKind::as_str)
        .unwrap_or("internal");
    serde_json::json!({
        "event": "error",
        "kind": kind,
        "message": err.to_string(),
    })
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        println!("{}", error_json(err));
        return;
    }

    let caps = detect_capabilities();
    if caps.github_actions {
        println!(
            "{}",
            github_actions_annotation(AnnotationLevel::Error, &err.to_string(), None, Some("defuse"))
        );
    }
    let color = caps.supports_color && !caps.is_ci;
    eprint!("{}", format_error(err, color, caps.supports_unicode));
}
