//! Agent definitions: item queue, worry transform, and routing rule.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense agent identity; doubles as an index into the population.
pub type AgentId = usize;

/// Worry-level transform applied on every inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// `old + n`
    Add(u64),
    /// `old * n`
    Multiply(u64),
    /// `old * old`
    Square,
    /// `old + old`
    Double,
}

impl Transform {
    /// Apply the transform in `u128`.
    ///
    /// Any `u64` operand squared or multiplied by a `u64` constant fits, so
    /// the result is exact; narrowing back happens after relief.
    pub fn apply(self, old: u64) -> u128 {
        let old = u128::from(old);
        match self {
            Transform::Add(n) => old + u128::from(n),
            Transform::Multiply(n) => old * u128::from(n),
            Transform::Square => old * old,
            Transform::Double => old + old,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Add(n) => write!(f, "old + {n}"),
            Transform::Multiply(n) => write!(f, "old * {n}"),
            Transform::Square => f.write_str("old * old"),
            Transform::Double => f.write_str("old + old"),
        }
    }
}

/// One member of the population.
///
/// Routing targets are plain ids into the owning population; the engine
/// resolves them by index, so self-loops and cycles need no shared ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub id: AgentId,
    /// FIFO queue of worry levels.
    pub items: VecDeque<u64>,
    pub transform: Transform,
    /// Divisibility test operand; must be > 0.
    pub divisor: u64,
    pub on_pass: AgentId,
    pub on_fail: AgentId,
    /// Items inspected so far. Zero at construction.
    pub inspections: u64,
}

impl Agent {
    pub fn new(
        id: AgentId,
        items: impl IntoIterator<Item = u64>,
        transform: Transform,
        divisor: u64,
        on_pass: AgentId,
        on_fail: AgentId,
    ) -> Self {
        Self {
            id,
            items: items.into_iter().collect(),
            transform,
            divisor,
            on_pass,
            on_fail,
            inspections: 0,
        }
    }

    /// Pick the routing target for an already-relieved worry level.
    pub fn target_for(&self, worry: u64) -> AgentId {
        if worry % self.divisor == 0 {
            self.on_pass
        } else {
            self.on_fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_apply_each_operator() {
        assert_eq!(Transform::Add(6).apply(54), 60);
        assert_eq!(Transform::Multiply(19).apply(79), 1501);
        assert_eq!(Transform::Square.apply(79), 6241);
        assert_eq!(Transform::Double.apply(21), 42);
    }

    #[test]
    fn transforms_exceed_u64_without_wrapping() {
        assert_eq!(
            Transform::Square.apply(u64::MAX),
            u128::from(u64::MAX) * u128::from(u64::MAX)
        );
        assert_eq!(
            Transform::Add(1).apply(u64::MAX),
            u128::from(u64::MAX) + 1
        );
    }

    #[test]
    fn target_follows_divisibility() {
        let agent = Agent::new(0, [], Transform::Square, 13, 1, 3);
        assert_eq!(agent.target_for(26), 1);
        assert_eq!(agent.target_for(27), 3);
    }

    #[test]
    fn display_matches_notes_syntax() {
        assert_eq!(Transform::Multiply(19).to_string(), "old * 19");
        assert_eq!(Transform::Square.to_string(), "old * old");
    }
}
