//! Orchestration for `keepaway run`, `keepaway solve` and `keepaway check`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::core::agent::{Agent, AgentId};
use crate::core::engine::{Completed, Simulation};
use crate::core::relief::ReliefPolicy;
use crate::io::config::{KeepawayConfig, PartConfig};
use crate::io::notes::load_notes;

/// Parameters for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    pub rounds: u32,
    pub relief: ReliefPolicy,
    pub top_k: usize,
}

impl RunRequest {
    pub fn from_part(part: PartConfig, top_k: usize) -> Self {
        Self {
            rounds: part.rounds,
            relief: part.relief,
            top_k,
        }
    }
}

/// Final per-agent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentReport {
    pub id: AgentId,
    pub inspections: u64,
    pub items: Vec<u64>,
}

/// Outcome of one run, in reporting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub rounds: u32,
    pub relief: ReliefPolicy,
    pub modulus_basis: u64,
    pub top_k: usize,
    /// Product of the `top_k` highest inspection counts.
    pub business: u64,
    pub agents: Vec<AgentReport>,
}

/// Both standard puzzle parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveOutcome {
    pub part_one: RunReport,
    pub part_two: RunReport,
}

/// Setup-only validation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub agents: usize,
    pub modulus_basis: u64,
}

/// Run a parsed population once.
pub fn run_population(agents: Vec<Agent>, request: &RunRequest) -> Result<RunReport> {
    let sim = Simulation::new(agents).context("set up simulation")?;
    let done = sim
        .run(request.rounds, request.relief)
        .with_context(|| format!("run {} rounds", request.rounds))?;
    let business = done
        .top_inspection_product(request.top_k)
        .context("compute business metric")?;
    info!(
        rounds = request.rounds,
        relief = %request.relief,
        business,
        "run finished"
    );
    Ok(report(&done, request.top_k, business))
}

/// Load notes from disk and run them once.
pub fn run_notes(notes_path: &Path, request: &RunRequest) -> Result<RunReport> {
    let agents = load_notes(notes_path)?;
    run_population(agents, request)
}

/// Load notes once and run both configured parts on fresh copies.
pub fn solve_notes(notes_path: &Path, cfg: &KeepawayConfig) -> Result<SolveOutcome> {
    let agents = load_notes(notes_path)?;
    let part_one = run_population(
        agents.clone(),
        &RunRequest::from_part(cfg.part_one, cfg.top_k),
    )
    .context("part one")?;
    let part_two = run_population(agents, &RunRequest::from_part(cfg.part_two, cfg.top_k))
        .context("part two")?;
    Ok(SolveOutcome { part_one, part_two })
}

/// Parse notes and validate the population without running it.
pub fn check_notes(notes_path: &Path) -> Result<CheckOutcome> {
    let agents = load_notes(notes_path)?;
    let sim = Simulation::new(agents).context("set up simulation")?;
    Ok(CheckOutcome {
        agents: sim.agents().len(),
        modulus_basis: sim.modulus_basis(),
    })
}

fn report(done: &Completed, top_k: usize, business: u64) -> RunReport {
    RunReport {
        rounds: done.rounds(),
        relief: done.relief(),
        modulus_basis: done.modulus_basis(),
        top_k,
        business,
        agents: done
            .agents()
            .iter()
            .map(|agent| AgentReport {
                id: agent.id,
                inspections: agent.inspections,
                items: agent.items.iter().copied().collect(),
            })
            .collect(),
    }
}
