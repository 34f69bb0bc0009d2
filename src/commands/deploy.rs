//! `defuse deploy`: the full neutralize, deploy, restore pipeline

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use defuse::application::{
    DeploymentSettings, PipelineOptions, PipelinePorts, PipelineUseCase, SnapshotOptions,
};
use defuse::domain::ports::PipelineEventSink;
use defuse::domain::value_objects::DeltaMode;
use defuse::infrastructure::{JsonEventSink, LocalFs, XmlManifestReader};
use defuse::presentation::{create_delta_generator, create_deploy_engine, DeployArgs};
use defuse::DefuseError;
use tracing::warn;

use super::Session;
use crate::ui::console::ConsoleEventSink;
use crate::ui::error::print_error;
use crate::ui::views::deploy::{render_deploy_header, render_deploy_summary};

/// Placeholder org for dry runs that never contact an org
const DRY_RUN_ORG: &str = "(none)";

fn resolve_options(session: &Session, args: &DeployArgs) -> Result<PipelineOptions> {
    let config = &session.config;
    let mode = args.mode.map(DeltaMode::from).unwrap_or(config.delta.mode);

    let target_org = match args.target_org.clone().or_else(|| config.deploy.target_org.clone()) {
        Some(org) => org,
        // git-diff dry runs stop before anything talks to the org
        None if args.dry_run && mode == DeltaMode::GitDiff => DRY_RUN_ORG.to_string(),
        None => {
            return Err(DefuseError::MissingSetting {
                key: "deploy.target_org",
                flag: "target-org",
                env: "DEFUSE_TARGET_ORG",
            }
            .into())
        }
    };

    let output_dir = match (&args.output_dir, &config.delta.output_dir) {
        (Some(dir), _) => session.from_cwd(dir),
        (None, Some(dir)) => session.workspace.resolve(dir),
        // filled in by the caller with a temporary directory
        (None, None) => Default::default(),
    };

    Ok(PipelineOptions {
        mode,
        base: args.from.clone().unwrap_or_else(|| config.delta.base.clone()),
        head: args.to.clone().unwrap_or_else(|| config.delta.head.clone()),
        source_root: session.source_root(args.source_dir.as_deref()),
        output_dir,
        deployment: DeploymentSettings {
            target_org,
            test_level: args
                .test_level
                .map(Into::into)
                .unwrap_or(config.deploy.test_level),
            wait_minutes: config.deploy.wait_minutes,
        },
        snapshot: SnapshotOptions {
            stash: config.snapshot.stash && !args.no_stash,
            include_untracked: config.snapshot.include_untracked,
        },
        dry_run: args.dry_run,
    })
}

/// Flag set by SIGINT, SIGTERM or SIGHUP
fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install signal handler")?;
    Ok(flag)
}

pub fn cmd_deploy(session: &Session, args: &DeployArgs) -> Result<i32> {
    let mut options = resolve_options(session, args)?;
    let ws = &session.workspace;
    let ui = &session.ui;

    // held until the manifests have been deployed
    let _delta_dir = if options.output_dir.as_os_str().is_empty() {
        let dir = tempfile::Builder::new()
            .prefix("defuse-delta-")
            .tempdir()
            .context("failed to create a temporary directory for the delta")?;
        options.output_dir = dir.path().to_path_buf();
        Some(dir)
    } else {
        None
    };

    let _lock = ws.lock()?;
    let interrupt = install_interrupt_flag()?;

    let scan = session.config.scan_options(&options.source_root)?;
    let delta = create_delta_generator(options.mode, &session.config, &ws.root);
    let engine = create_deploy_engine(&session.config, &ws.root);
    let reader = XmlManifestReader::new();
    let fs = LocalFs::new();
    let journal = ws.journal();

    let json_sink;
    let console_sink;
    let sink: &dyn PipelineEventSink = if ui.json {
        json_sink = JsonEventSink::stdout();
        &json_sink
    } else {
        print!(
            "{}",
            render_deploy_header(&options, &ws.root, ui.color, ui.unicode)
        );
        console_sink = ConsoleEventSink::new(*ui, &ws.root);
        &console_sink
    };

    let use_case = PipelineUseCase::new(PipelinePorts {
        delta: delta.as_ref(),
        manifest_reader: &reader,
        engine: &engine,
        fs: &fs,
        tree: ws.tree.as_ref(),
        journal: &journal,
        scan: &scan,
    })
    .with_interrupt(&interrupt);

    let mut report = use_case.execute(&options, sink);
    let code = report.exit_code();

    if !ui.json {
        print!(
            "{}",
            render_deploy_summary(&report, &ws.root, ui.color, ui.unicode)
        );
    }
    if let Some(err) = report.error.take() {
        if matches!(err, DefuseError::Interrupted) {
            warn!("run interrupted by signal");
        }
        print_error(&anyhow::Error::new(err), ui.json);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::context::UiContext;
    use defuse::config::Config;
    use defuse::domain::value_objects::TestLevel;
    use defuse::presentation::{ModeArg, TestLevelArg, Workspace};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn session(root: &std::path::Path, config: Config) -> Session {
        Session {
            cwd: root.to_path_buf(),
            workspace: Workspace::open(root, "git").unwrap(),
            ui: UiContext::new(true, 0, None, &config),
            config,
        }
    }

    #[test]
    fn flags_override_config() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.deploy.target_org = Some("from-config".to_string());
        config.delta.base = "main".to_string();
        let session = session(dir.path(), config);

        let args = DeployArgs {
            target_org: Some("from-flag".to_string()),
            to: Some("feature".to_string()),
            mode: Some(ModeArg::OrgSnapshot),
            test_level: Some(TestLevelArg::RunAllTestsInOrg),
            output_dir: Some(PathBuf::from("out")),
            no_stash: true,
            ..Default::default()
        };
        let options = resolve_options(&session, &args).unwrap();

        assert_eq!(options.deployment.target_org, "from-flag");
        assert_eq!(options.base, "main");
        assert_eq!(options.head, "feature");
        assert_eq!(options.mode, DeltaMode::OrgSnapshot);
        assert_eq!(options.deployment.test_level, TestLevel::RunAllTestsInOrg);
        assert_eq!(options.output_dir, dir.path().join("out"));
        assert_eq!(options.source_root, session.workspace.root.join("force-app"));
        assert!(!options.snapshot.stash);
    }

    #[test]
    fn missing_org_is_an_error() {
        let dir = tempdir().unwrap();
        let session = session(dir.path(), Config::default());

        let err = resolve_options(&session, &DeployArgs::default()).unwrap_err();
        assert!(err.to_string().contains("--target-org"));
    }

    #[test]
    fn git_diff_dry_run_needs_no_org() {
        let dir = tempdir().unwrap();
        let session = session(dir.path(), Config::default());
        let args = DeployArgs {
            dry_run: true,
            ..Default::default()
        };

        let options = resolve_options(&session, &args).unwrap();
        assert_eq!(options.deployment.target_org, DRY_RUN_ORG);
        assert!(options.output_dir.as_os_str().is_empty());
    }
}
