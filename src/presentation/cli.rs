//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose) are accepted before or after
//! the subcommand. Every deploy setting left unset falls back to the
//! environment, then `defuse.toml`, then the user config.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::{DeltaMode, TestLevel};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    GitDiff,
    OrgSnapshot,
}

impl From<ModeArg> for DeltaMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::GitDiff => DeltaMode::GitDiff,
            ModeArg::OrgSnapshot => DeltaMode::OrgSnapshot,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestLevelArg {
    #[value(name = "NoTestRun", alias = "none")]
    NoTestRun,
    #[value(name = "RunLocalTests", alias = "local")]
    RunLocalTests,
    #[value(name = "RunAllTestsInOrg", alias = "all")]
    RunAllTestsInOrg,
}

impl From<TestLevelArg> for TestLevel {
    fn from(level: TestLevelArg) -> Self {
        match level {
            TestLevelArg::NoTestRun => TestLevel::NoTestRun,
            TestLevelArg::RunLocalTests => TestLevel::RunLocalTests,
            TestLevelArg::RunAllTestsInOrg => TestLevel::RunAllTestsInOrg,
        }
    }
}

/// defuse - deploy Salesforce destructive changes without dependency errors
#[derive(Parser, Debug)]
#[command(name = "defuse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the delta, neutralize dependents, deploy, restore
    Deploy(DeployArgs),

    /// List files that reference components in a deletion manifest
    Scan {
        /// Deletion manifest (destructiveChanges.xml)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Source tree to scan
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Show the neutralization as a unified diff
        #[arg(long)]
        diff: bool,
    },

    /// Restore a tree left neutralized by an interrupted run
    Recover,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct DeployArgs {
    /// Target org alias or username
    #[arg(long)]
    pub target_org: Option<String>,

    /// Base revision of the delta
    #[arg(long)]
    pub from: Option<String>,

    /// Head revision of the delta
    #[arg(long)]
    pub to: Option<String>,

    /// How the delta is computed
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Source tree to scan and mutate
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Apex test level for the deployment
    #[arg(long, value_enum)]
    pub test_level: Option<TestLevelArg>,

    /// Directory for the generated manifests
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Report what would be neutralized; change nothing, deploy nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not set uncommitted changes aside before neutralizing
    #[arg(long)]
    pub no_stash: bool,
}
