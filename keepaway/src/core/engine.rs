//! Round-based simulation engine.
//!
//! The engine has two phases. [`Simulation`] is the setup phase: the
//! population is validated, counters are zero and the modulus basis is fixed.
//! [`Simulation::run`] consumes it and yields a [`Completed`] run, so there is
//! no path back to setup and no partially-run state is observable.

use tracing::{debug, trace};

use crate::core::agent::Agent;
use crate::core::error::SimError;
use crate::core::metric::top_inspection_product;
use crate::core::relief::ReliefPolicy;

/// A validated population that has not run yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    agents: Vec<Agent>,
    modulus_basis: u64,
}

/// Population state after every requested round has executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    agents: Vec<Agent>,
    modulus_basis: u64,
    rounds: u32,
    relief: ReliefPolicy,
}

impl Simulation {
    /// Validate `agents` and compute the modulus basis.
    ///
    /// Agents are ordered by id; ids must then cover `0..N` exactly. Every
    /// route must point inside the population and every divisor must be
    /// positive. All violations are reported together.
    pub fn new(mut agents: Vec<Agent>) -> Result<Self, SimError> {
        agents.sort_by_key(|agent| agent.id);
        let errors = validate_population(&agents);
        if !errors.is_empty() {
            return Err(SimError::configuration(errors.join("; ")));
        }
        let modulus_basis = modulus_basis(&agents)?;
        debug!(agents = agents.len(), modulus_basis, "simulation ready");
        Ok(Self {
            agents,
            modulus_basis,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Product of every agent's divisor.
    pub fn modulus_basis(&self) -> u64 {
        self.modulus_basis
    }

    /// Execute `rounds` rounds under `relief`.
    pub fn run(self, rounds: u32, relief: ReliefPolicy) -> Result<Completed, SimError> {
        self.run_with(rounds, relief, |_, _| {})
    }

    /// Execute `rounds` rounds, calling `on_round(round, agents)` after each
    /// round completes (rounds are 1-indexed).
    pub fn run_with<F: FnMut(u32, &[Agent])>(
        mut self,
        rounds: u32,
        relief: ReliefPolicy,
        mut on_round: F,
    ) -> Result<Completed, SimError> {
        debug!(rounds, %relief, "starting run");
        for round in 1..=rounds {
            self.play_round(relief)?;
            trace!(round, "round complete");
            on_round(round, &self.agents);
        }
        debug!(rounds, "run complete");
        Ok(Completed {
            agents: self.agents,
            modulus_basis: self.modulus_basis,
            rounds,
            relief,
        })
    }

    /// One pass over the population in ascending id order.
    ///
    /// Each agent's queue is taken as a snapshot before inspection, so items
    /// it throws to itself wait for the next round while items thrown to a
    /// higher id are inspected later in this same round.
    fn play_round(&mut self, relief: ReliefPolicy) -> Result<(), SimError> {
        for index in 0..self.agents.len() {
            let snapshot = std::mem::take(&mut self.agents[index].items);
            for old in snapshot {
                let agent = &self.agents[index];
                let transformed = agent.transform.apply(old);
                let worry = relief
                    .relieve(transformed, self.modulus_basis)
                    .ok_or_else(|| SimError::WorryOverflow {
                        agent: agent.id,
                        transform: agent.transform.to_string(),
                        worry: old,
                    })?;
                let target = agent.target_for(worry);
                self.agents[target].items.push_back(worry);
                self.agents[index].inspections += 1;
            }
        }
        Ok(())
    }
}

impl Completed {
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn modulus_basis(&self) -> u64 {
        self.modulus_basis
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn relief(&self) -> ReliefPolicy {
        self.relief
    }

    /// Inspection counts in agent id order.
    pub fn inspection_counts(&self) -> Vec<u64> {
        self.agents.iter().map(|agent| agent.inspections).collect()
    }

    /// Product of the `k` largest inspection counts.
    pub fn top_inspection_product(&self, k: usize) -> Result<u64, SimError> {
        top_inspection_product(&self.agents, k)
    }
}

/// Semantic checks on a population already sorted by id.
fn validate_population(agents: &[Agent]) -> Vec<String> {
    let mut errors = Vec::new();
    if agents.is_empty() {
        errors.push("population must contain at least one agent".to_string());
        return errors;
    }

    let count = agents.len();
    for (index, agent) in agents.iter().enumerate() {
        if agent.id != index {
            errors.push(format!(
                "agent ids must be dense from 0: expected {} but found {}",
                index, agent.id
            ));
        }
        if agent.divisor == 0 {
            errors.push(format!("agent {}: divisor must be > 0", agent.id));
        }
        if agent.on_pass >= count {
            errors.push(format!(
                "agent {}: pass route {} is not a known agent",
                agent.id, agent.on_pass
            ));
        }
        if agent.on_fail >= count {
            errors.push(format!(
                "agent {}: fail route {} is not a known agent",
                agent.id, agent.on_fail
            ));
        }
        if agent.inspections != 0 {
            errors.push(format!(
                "agent {}: inspection count must start at 0, found {}",
                agent.id, agent.inspections
            ));
        }
    }
    errors
}

fn modulus_basis(agents: &[Agent]) -> Result<u64, SimError> {
    agents
        .iter()
        .try_fold(1u64, |basis, agent| basis.checked_mul(agent.divisor))
        .ok_or_else(|| SimError::configuration("product of divisors overflows u64"))
}
