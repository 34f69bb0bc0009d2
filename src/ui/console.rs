//! Human-readable pipeline progress, one line per stage

use std::io::{self, Write};
use std::path::Path;

use defuse::domain::ports::{PipelineEvent, PipelineEventSink};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink<'a> {
    ui: UiContext,
    root: &'a Path,
}

impl<'a> ConsoleEventSink<'a> {
    /// Paths in messages are shown relative to `root`
    pub fn new(ui: UiContext, root: &'a Path) -> Self {
        Self { ui, root }
    }

    fn rel<'p>(&self, path: &'p Path) -> std::borrow::Cow<'p, str> {
        path.strip_prefix(self.root)
            .unwrap_or(path)
            .to_string_lossy()
    }

    /// The line printed for `event`, if any
    pub fn render(&self, event: &PipelineEvent) -> Option<String> {
        let (color, unicode) = (self.ui.color, self.ui.unicode);
        let icon = |i: Icon| i.colored(color, unicode);

        let line = match event {
            PipelineEvent::DeltaReady {
                mode,
                destructive_manifest,
                ..
            } => format!(
                "{} delta ready ({}){}",
                icon(Icon::Success),
                mode,
                if destructive_manifest.is_some() {
                    ""
                } else {
                    ", no deletions"
                }
            ),
            PipelineEvent::ManifestParsed { components } => {
                if components.is_empty() {
                    return None;
                }
                format!(
                    "{} {} component(s) to delete: {}",
                    icon(Icon::Success),
                    components.len(),
                    components.join(", ")
                )
            }
            PipelineEvent::Scanned { files } => {
                let mut out = format!(
                    "{} {} dependent file(s)",
                    icon(Icon::Scan),
                    files.len()
                );
                if self.ui.verbose > 0 {
                    for (file, members) in files {
                        out.push_str(&format!(
                            "\n    {} {}",
                            self.rel(file),
                            ColoredText::dim(format!("({})", members.join(", "))).render(color)
                        ));
                    }
                }
                out
            }
            PipelineEvent::SnapshotAcquired { stashed } => {
                if !stashed {
                    return None;
                }
                format!("{} local changes set aside", icon(Icon::Progress))
            }
            PipelineEvent::FileNeutralized { path, lines } => format!(
                "{} {} {}",
                icon(Icon::Neutralize),
                self.rel(path),
                ColoredText::dim(format!("({} line(s) disabled)", lines.len())).render(color)
            ),
            PipelineEvent::DeployStarted {
                target_org,
                destructive,
            } => format!(
                "{} deploying to {}{}",
                icon(Icon::Deploy),
                ColoredText::info(target_org.as_str()).bold().render(color),
                if *destructive {
                    " with destructive changes"
                } else {
                    ""
                }
            ),
            PipelineEvent::DeployFinished { success, .. } => {
                if *success {
                    format!("{} deployment succeeded", icon(Icon::Success))
                } else {
                    format!("{} deployment failed", icon(Icon::Error))
                }
            }
            PipelineEvent::Restored {
                files,
                reapplied_stash,
            } => format!(
                "{} {} file(s) restored{}",
                icon(Icon::Restore),
                files,
                if *reapplied_stash {
                    ", local changes reapplied"
                } else {
                    ""
                }
            ),
            PipelineEvent::Warning { message } => {
                format!("{} {}", icon(Icon::Warning), message)
            }
            PipelineEvent::Finished { .. } => return None,
        };
        Some(line)
    }
}

impl PipelineEventSink for ConsoleEventSink<'_> {
    fn on_event(&self, event: PipelineEvent) {
        if let (true, PipelineEvent::Warning { message }) = (self.ui.caps.github_actions, &event) {
            println!(
                "{}",
                github_actions_annotation(AnnotationLevel::Warning, message, None, Some("defuse"))
            );
        }
        if let Some(line) = self.render(&event) {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", line);
        }
    }
}
