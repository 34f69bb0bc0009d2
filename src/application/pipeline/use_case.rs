//! Pipeline Use Case
//!
//! Drives one run through its states:
//!
//! 1. Generate the delta manifests
//! 2. Parse the deletion manifest
//! 3. Scan the source tree for dependent files
//! 4. Neutralize them inside a snapshot guard (only when something matched)
//! 5. Deploy
//! 6. Release the guard, restoring every file
//!
//! Every fatal error after step 4 began still passes through step 6. The
//! terminal state is decided only after the guard has been released.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::options::PipelineOptions;
use super::result::PipelineReport;
use super::state::PipelineState;
use crate::application::orchestrator::DeploymentOrchestrator;
use crate::application::scan::plan_neutralization;
use crate::application::snapshot::{ReleaseReport, SnapshotGuard};
use crate::domain::entities::DependencyMatch;
use crate::domain::ports::{
    DeltaGenerator, DeltaOutput, DeltaRequest, DeploymentEngine, DeploymentResult, FileSystem,
    JournalStore, ManifestReader, PipelineEvent, PipelineEventSink, WorkingTree,
};
use crate::domain::services::{DependencyScanner, ScanOptions, SourceNeutralizer};
use crate::error::{DefuseError, DefuseResult};

/// Collaborators of a run
pub struct PipelinePorts<'a> {
    pub delta: &'a dyn DeltaGenerator,
    pub manifest_reader: &'a dyn ManifestReader,
    pub engine: &'a dyn DeploymentEngine,
    pub fs: &'a dyn FileSystem,
    pub tree: &'a dyn WorkingTree,
    pub journal: &'a dyn JournalStore,
    pub scan: &'a ScanOptions,
}

pub struct PipelineUseCase<'a> {
    ports: PipelinePorts<'a>,
    interrupt: Option<&'a AtomicBool>,
}

/// Mutable state of one execution
struct Run<'s> {
    report: PipelineReport,
    sink: &'s dyn PipelineEventSink,
}

impl Run<'_> {
    fn advance(&mut self, next: PipelineState) {
        let current = self.report.state();
        debug_assert!(
            current.can_advance_to(next),
            "illegal transition {} -> {}",
            current,
            next
        );
        debug!(from = %current, to = %next, "pipeline state");
        self.report.trail.push(next);
    }

    fn emit(&self, event: PipelineEvent) {
        self.sink.on_event(event);
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.emit(PipelineEvent::Warning {
            message: message.clone(),
        });
        self.report.warnings.push(message);
    }

    fn finish(mut self, outcome: DefuseResult<()>) -> PipelineReport {
        match outcome {
            Ok(()) => self.advance(PipelineState::Done),
            Err(e) => {
                warn!(error = %e, state = %self.report.state(), "pipeline failed");
                self.advance(PipelineState::Failed);
                self.report.error = Some(e);
            }
        }
        let state = self.report.state();
        self.emit(PipelineEvent::Finished {
            success: self.report.is_success(),
            state: state.to_string(),
        });
        info!(state = %state, "pipeline finished");
        self.report
    }

    fn record_release(&mut self, release: ReleaseReport) {
        self.report.restored = release.restored.len();
        self.report.reapplied_stash = release.reapplied_stash;
        self.emit(PipelineEvent::Restored {
            files: release.restored.len(),
            reapplied_stash: release.reapplied_stash,
        });
        for warning in release.warnings() {
            self.warn(warning);
        }
    }
}

impl<'a> PipelineUseCase<'a> {
    pub fn new(ports: PipelinePorts<'a>) -> Self {
        Self {
            ports,
            interrupt: None,
        }
    }

    /// Abort between stages once `flag` is set
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Run the pipeline to a terminal state
    pub fn execute(&self, options: &PipelineOptions, sink: &dyn PipelineEventSink) -> PipelineReport {
        let mut run = Run {
            report: PipelineReport::new(options.dry_run),
            sink,
        };
        let outcome = match self.drive(options, &mut run) {
            // the signal also reaches child processes; report the cause, not the symptom
            Err(e) if self.interrupted() && !matches!(e, DefuseError::Interrupted) => {
                debug!(error = %e, "failure after interrupt");
                Err(DefuseError::Interrupted)
            }
            outcome => outcome,
        };
        run.finish(outcome)
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn check_interrupt(&self) -> DefuseResult<()> {
        if self.interrupted() {
            return Err(DefuseError::Interrupted);
        }
        Ok(())
    }

    fn drive(&self, options: &PipelineOptions, run: &mut Run<'_>) -> DefuseResult<()> {
        // Init -> DeltaReady
        let request = DeltaRequest {
            base: options.base.clone(),
            head: options.head.clone(),
            source_root: options.source_root.clone(),
            output_dir: options.output_dir.clone(),
            target_org: options.deployment.target_org.clone(),
        };
        info!(delta = %self.ports.delta.describe(&request), "generating delta");
        let delta = self.ports.delta.generate(&request)?;
        run.advance(PipelineState::DeltaReady);
        run.emit(PipelineEvent::DeltaReady {
            mode: options.mode,
            additions_manifest: delta.additions_manifest.clone(),
            destructive_manifest: delta.destructive_manifest.clone(),
        });
        run.report.delta = Some(delta.clone());
        self.check_interrupt()?;

        // DeltaReady -> ManifestParsed
        let manifest = self
            .ports
            .manifest_reader
            .read(delta.destructive_manifest.as_deref())?;
        run.advance(PipelineState::ManifestParsed);
        run.report.components = manifest
            .components()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        run.emit(PipelineEvent::ManifestParsed {
            components: run.report.components.clone(),
        });
        self.check_interrupt()?;

        // ManifestParsed -> Scanned
        let matches = DependencyScanner::new(self.ports.fs, self.ports.scan)
            .excluding(&options.output_dir)
            .scan(&manifest, &options.source_root)?;
        run.advance(PipelineState::Scanned);
        run.emit(PipelineEvent::Scanned {
            files: matches
                .iter()
                .map(|m| (m.file().to_path_buf(), m.members().iter().cloned().collect()))
                .collect(),
        });
        run.report.matches = matches.clone();

        if options.dry_run {
            run.report.planned = plan_neutralization(self.ports.fs, &matches)?;
            info!(files = run.report.planned.len(), "dry run; nothing mutated or deployed");
            return Ok(());
        }
        self.check_interrupt()?;

        if matches.is_empty() {
            run.advance(PipelineState::Deploying);
            return self.deploy(&delta, options, run).map(|_| ());
        }

        // Scanned -> Neutralizing, guarded until release
        run.advance(PipelineState::Neutralizing);
        let mut guard = SnapshotGuard::acquire(
            self.ports.fs,
            self.ports.tree,
            self.ports.journal,
            options.snapshot,
            &[options.output_dir.as_path()],
        )?;
        run.emit(PipelineEvent::SnapshotAcquired {
            stashed: guard.stash_state().is_stashed(),
        });

        let outcome = self.guarded(&mut guard, &matches, &delta, options, run);
        let release = guard.release();
        run.record_release(release);
        outcome.map(|_| ())
    }

    /// Neutralize then deploy, with the guard held
    fn guarded(
        &self,
        guard: &mut SnapshotGuard<'_>,
        matches: &[DependencyMatch],
        delta: &DeltaOutput,
        options: &PipelineOptions,
        run: &mut Run<'_>,
    ) -> DefuseResult<DeploymentResult> {
        let neutralizer = SourceNeutralizer::new();

        for m in matches {
            self.check_interrupt()?;
            // re-read: stashing may have changed the file since the scan
            let content = match self.ports.fs.read(m.file()) {
                Ok(content) => content,
                Err(e) if e.is_not_found() => {
                    run.warn(format!(
                        "{} no longer exists after setting local changes aside; skipped",
                        m.file().display()
                    ));
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let Some(plan) = neutralizer.neutralize(m.file(), &content, m.members()) else {
                debug!(path = %m.file().display(), "no reference left after stash");
                continue;
            };

            let lines = plan.lines.clone();
            guard.apply(plan)?;
            run.emit(PipelineEvent::FileNeutralized {
                path: m.file().to_path_buf(),
                lines: lines.clone(),
            });
            run.report.neutralized.push((m.file().to_path_buf(), lines));
        }
        info!(
            files = guard.ledger().len(),
            lines = guard.ledger().disabled_line_count(),
            "neutralized"
        );

        self.check_interrupt()?;
        run.advance(PipelineState::Deploying);
        self.deploy(delta, options, run)
    }

    fn deploy(
        &self,
        delta: &DeltaOutput,
        options: &PipelineOptions,
        run: &mut Run<'_>,
    ) -> DefuseResult<DeploymentResult> {
        let orchestrator = DeploymentOrchestrator::new(self.ports.engine, &options.deployment);
        let request = orchestrator.request(delta);
        run.emit(PipelineEvent::DeployStarted {
            target_org: request.target_org.clone(),
            destructive: request.destructive_manifest.is_some(),
        });

        let outcome = orchestrator.run(&request);
        match &outcome {
            Ok(result) => {
                run.emit(PipelineEvent::DeployFinished {
                    success: true,
                    diagnostic: result.diagnostic.clone(),
                });
                run.report.deployment = Some(result.clone());
            }
            Err(DefuseError::DeploymentFailed {
                exit_code,
                diagnostic,
                ..
            }) => {
                run.emit(PipelineEvent::DeployFinished {
                    success: false,
                    diagnostic: diagnostic.clone(),
                });
                run.report.deployment = Some(DeploymentResult::failed(*exit_code, diagnostic.clone()));
            }
            Err(_) => {}
        }
        outcome
    }
}
