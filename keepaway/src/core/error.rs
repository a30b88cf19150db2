//! Error taxonomy for the simulation core.

use thiserror::Error;

use crate::core::agent::AgentId;

/// Errors raised by the simulation engine and its metric queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Malformed agent population, detected at setup before any round runs.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// More top entries requested than agents exist.
    #[error("requested top {requested} inspection counts but only {available} agents exist")]
    Range { requested: usize, available: usize },
    /// A transformed and relieved worry level does not fit in a `u64`.
    #[error("worry level overflow: agent {agent} could not apply {transform} to {worry}")]
    WorryOverflow {
        agent: AgentId,
        transform: String,
        worry: u64,
    },
    /// Product of inspection counts does not fit in a `u64`.
    #[error("inspection product overflow for top {k} counts")]
    ProductOverflow { k: usize },
}

impl SimError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
