// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sleeve - wall openings for linked MEP models.
//!
//! Loads a JSON project holding an architectural document and an MEP
//! document, places an opening wherever a duct or pipe crosses a wall, and
//! writes the project back.
//!
//! Usage:
//!   sleeve <project.json> [-o|--output path] [--report path] [--parallel] [--dry-run]

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use sleeve_model::Session;
use sleeve_placement::{AddOpenings, CommandResult};

mod args;
mod config;
mod console;

use args::Command;
use config::Config;
use console::ConsoleDiagnostics;

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::from_env();
    init_logging(&config);

    let run = match args::parse(std::env::args().skip(1)) {
        Ok(Command::Run(run)) => run,
        Ok(Command::Help) => {
            args::print_usage();
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            eprintln!("{}", err);
            args::print_usage();
            return Ok(ExitCode::from(2));
        }
    };

    let mut command_config = config.command_config();
    command_config.planner.parallel |= run.parallel;
    command_config.dry_run = run.dry_run;

    tracing::info!(
        project = %run.project.display(),
        collaborator = %command_config.collaborator_title,
        family = %command_config.family_name,
        parallel = command_config.planner.parallel,
        dry_run = command_config.dry_run,
        worker_threads = config.worker_threads,
        "Starting Sleeve"
    );

    if command_config.planner.parallel {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build_global()
            .context("Failed to initialize rayon thread pool")?;
    }

    let json = fs::read_to_string(&run.project)
        .with_context(|| format!("Failed to read {}", run.project.display()))?;
    let mut session = Session::from_json(&json)
        .with_context(|| format!("Failed to load project {}", run.project.display()))?;

    let outcome = AddOpenings::new(command_config).execute(&mut session, &ConsoleDiagnostics);
    let report = outcome.report();

    if let Some(path) = &run.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if outcome.result == CommandResult::Succeeded && !run.dry_run {
        let json = session.to_json().context("Failed to encode project")?;
        fs::write(&run.output, json)
            .with_context(|| format!("Failed to write {}", run.output.display()))?;
    }

    let (count, verb) = if run.dry_run {
        (report.openings.len(), "planned")
    } else {
        (outcome.created.len(), "placed")
    };
    println!(
        "{}: {} openings {} ({} ducts, {} pipes, {} crossings, {} linked skipped)",
        report.result,
        count,
        verb,
        report.stats.ducts,
        report.stats.pipes,
        report.stats.crossings,
        report.stats.linked_skipped
    );

    Ok(match outcome.result {
        CommandResult::Succeeded => ExitCode::SUCCESS,
        CommandResult::Cancelled => ExitCode::from(3),
        CommandResult::Failed => ExitCode::FAILURE,
    })
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json_logs {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}
