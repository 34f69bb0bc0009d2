//! Command handlers
//!
//! Each handler returns the process exit code. Errors that abort a command
//! before it produces a report are returned as `anyhow::Error` and rendered
//! by `main`.

pub mod deploy;
pub mod recover;
pub mod scan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use defuse::config::{Config, ConfigWarning};
use defuse::presentation::{discover_project_root, ColorWhen, Workspace};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Copy)]
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<ColorWhen>,
}

/// Project, configuration and rendering context of one invocation
pub struct Session {
    pub cwd: PathBuf,
    pub workspace: Workspace,
    pub config: Config,
    pub ui: UiContext,
}

impl Session {
    pub fn open(global: GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine the current directory")?;
        let root = discover_project_root(&cwd);
        let (config, warnings) = Config::load_layered(&root)?;
        let ui = UiContext::new(global.json, global.verbose, global.color, &config);
        report_config_warnings(&warnings, &ui);

        let workspace = Workspace::open(&root, &config.tools.git)?;
        Ok(Self {
            cwd,
            workspace,
            config,
            ui,
        })
    }

    /// A path typed on the command line, relative to where defuse was run
    pub fn from_cwd(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// The source root: the flag if given, else `[source] root`
    pub fn source_root(&self, flag: Option<&Path>) -> PathBuf {
        match flag {
            Some(dir) => self.from_cwd(dir),
            None => self.workspace.resolve(&self.config.source.root),
        }
    }
}

fn report_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    for warning in warnings {
        if ui.json {
            println!(
                "{}",
                serde_json::json!({ "event": "warning", "message": warning.to_string() })
            );
        } else {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                warning
            );
        }
    }
}
