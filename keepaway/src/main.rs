//! Item-inspection simulator CLI.
//!
//! Reads puzzle notes describing the agent population, runs the rounds and
//! prints the business metric (product of the highest inspection counts).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use keepaway::core::error::SimError;
use keepaway::core::relief::ReliefPolicy;
use keepaway::exit_codes;
use keepaway::io::config::{DEFAULT_CONFIG_FILE, load_config};
use keepaway::logging;
use keepaway::solve::{RunReport, RunRequest, check_notes, run_notes, solve_notes};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "keepaway",
    version,
    about = "Deterministic item-inspection simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one simulation and print per-agent counts and the business metric.
    Run {
        /// Notes file describing the agents.
        notes: PathBuf,
        /// Rounds to execute (default: config `part_one.rounds`).
        #[arg(long)]
        rounds: Option<u32>,
        /// Relief policy (default: config `part_one.relief`).
        #[arg(long, value_enum)]
        relief: Option<ReliefArg>,
        /// Number of highest counts to multiply (default: config `top_k`).
        #[arg(long)]
        top: Option<usize>,
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Print a JSON report instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Run both configured puzzle parts and print both metrics.
    Solve {
        notes: PathBuf,
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Parse and validate notes without running any rounds.
    Check { notes: PathBuf },
}

/// `--relief` values, spelled like the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum ReliefArg {
    DivideByThree,
    ModuloBasis,
}

impl From<ReliefArg> for ReliefPolicy {
    fn from(arg: ReliefArg) -> Self {
        match arg {
            ReliefArg::DivideByThree => ReliefPolicy::DivideByThree,
            ReliefArg::ModuloBasis => ReliefPolicy::ModuloBasis,
        }
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            notes,
            rounds,
            relief,
            top,
            config,
            json,
        } => cmd_run(&notes, rounds, relief, top, &config, json),
        Command::Solve {
            notes,
            config,
            json,
        } => cmd_solve(&notes, &config, json),
        Command::Check { notes } => cmd_check(&notes),
    }
}

fn cmd_run(
    notes: &Path,
    rounds: Option<u32>,
    relief: Option<ReliefArg>,
    top: Option<usize>,
    config: &Path,
    json: bool,
) -> Result<()> {
    let cfg = load_config(config)?;
    let request = RunRequest {
        rounds: rounds.unwrap_or(cfg.part_one.rounds),
        relief: relief.map_or(cfg.part_one.relief, ReliefPolicy::from),
        top_k: top.unwrap_or(cfg.top_k),
    };
    let report = run_notes(notes, &request)?;
    if json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn cmd_solve(notes: &Path, config: &Path, json: bool) -> Result<()> {
    let cfg = load_config(config)?;
    let outcome = solve_notes(notes, &cfg)?;
    if json {
        return print_json(&outcome);
    }
    println!("part_one={}", outcome.part_one.business);
    println!("part_two={}", outcome.part_two.business);
    Ok(())
}

fn cmd_check(notes: &Path) -> Result<()> {
    let outcome = check_notes(notes)?;
    println!(
        "check: agents={} modulus_basis={}",
        outcome.agents, outcome.modulus_basis
    );
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "run: rounds={} relief={} modulus_basis={}",
        report.rounds, report.relief, report.modulus_basis
    );
    for agent in &report.agents {
        let items: Vec<String> = agent.items.iter().map(u64::to_string).collect();
        println!(
            "agent={} inspections={} items=[{}]",
            agent.id,
            agent.inspections,
            items.join(", ")
        );
    }
    println!("business={}", report.business);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json report")?;
    println!("{payload}");
    Ok(())
}

/// Range errors get their own code so callers can retry with a smaller `--top`.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SimError>() {
        Some(SimError::Range { .. }) => exit_codes::RANGE,
        _ => exit_codes::INVALID,
    }
}
