//! defuse - deploy Salesforce destructive changes without dependency errors
//!
//! Usage: defuse <COMMAND>
//!
//! Commands:
//!   deploy   Generate the delta, neutralize dependents, deploy, restore
//!   scan     List files that reference components in a deletion manifest
//!   recover  Restore a tree left neutralized by an interrupted run

mod commands;
mod ui;

use clap::Parser;
use defuse::presentation::{Cli, Commands};
use defuse::DefuseError;

use commands::{GlobalArgs, Session};

fn run(cli: Cli) -> anyhow::Result<i32> {
    let global = GlobalArgs {
        json: cli.json,
        verbose: cli.verbose,
        color: cli.color,
    };
    let session = Session::open(global)?;

    match cli.command {
        Commands::Deploy(args) => commands::deploy::cmd_deploy(&session, &args),
        Commands::Scan {
            manifest,
            source_dir,
            diff,
        } => commands::scan::cmd_scan(&session, &manifest, source_dir.as_deref(), diff),
        Commands::Recover => commands::recover::cmd_recover(&session),
    }
}

fn main() {
    let cli = Cli::parse();
    defuse::logging::init(cli.verbose);
    let json = cli.json;

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, json);
            err.downcast_ref::<DefuseError>()
                .map(DefuseError::exit_code)
                .unwrap_or(1)
        }
    };
    std::process::exit(code);
}
