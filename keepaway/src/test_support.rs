//! Test-only helpers for constructing agent populations.

use crate::core::agent::{Agent, AgentId, Transform};

/// The canonical four-agent example notes.
pub const EXAMPLE_NOTES: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/example_notes.txt"
));

/// Create an agent with explicit items and routing.
pub fn agent(
    id: AgentId,
    items: &[u64],
    transform: Transform,
    divisor: u64,
    on_pass: AgentId,
    on_fail: AgentId,
) -> Agent {
    Agent::new(
        id,
        items.iter().copied(),
        transform,
        divisor,
        on_pass,
        on_fail,
    )
}

/// Create idle self-looping agents carrying the given inspection counts.
pub fn counted(counts: &[u64]) -> Vec<Agent> {
    counts
        .iter()
        .enumerate()
        .map(|(id, count)| {
            let mut agent = agent(id, &[], Transform::Add(0), 1, id, id);
            agent.inspections = *count;
            agent
        })
        .collect()
}

/// The population described by [`EXAMPLE_NOTES`].
pub fn example_agents() -> Vec<Agent> {
    vec![
        agent(0, &[79, 98], Transform::Multiply(19), 23, 2, 3),
        agent(1, &[54, 65, 75, 74], Transform::Add(6), 19, 2, 0),
        agent(2, &[79, 60, 97], Transform::Square, 13, 1, 3),
        agent(3, &[74], Transform::Add(3), 17, 0, 1),
    ]
}
