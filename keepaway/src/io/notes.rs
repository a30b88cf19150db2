//! Parser for puzzle notes describing the agent population.
//!
//! Notes are blank-line separated blocks:
//!
//! ```text
//! Monkey 0:
//!   Starting items: 79, 98
//!   Operation: new = old * 19
//!   Test: divisible by 23
//!     If true: throw to monkey 2
//!     If false: throw to monkey 3
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use tracing::debug;

use crate::core::agent::{Agent, AgentId, Transform};

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Monkey (\d+):$").expect("valid header regex"));
static ITEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Starting items:(.*)$").expect("valid items regex"));
static OPERATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Operation: new = old (\S+) (\S+)$").expect("valid operation regex")
});
static TEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Test: divisible by (\d+)$").expect("valid test regex"));
static BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^If (true|false): throw to monkey (\d+)$").expect("valid branch regex")
});

/// Load and parse notes from disk.
pub fn load_notes(path: &Path) -> Result<Vec<Agent>> {
    debug!(path = %path.display(), "loading notes");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read notes {}", path.display()))?;
    parse_notes(&contents).with_context(|| format!("parse notes {}", path.display()))
}

/// Parse notes into agents sorted by id.
///
/// Routing targets and id density are not checked here; the simulation
/// setup validates the population as a whole.
pub fn parse_notes(contents: &str) -> Result<Vec<Agent>> {
    let mut agents = Vec::new();
    let mut current: Option<AgentDraft> = None;

    for (index, raw) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            if let Some(draft) = current.take() {
                agents.push(draft.finish()?);
            }
            continue;
        }

        if let Some(caps) = HEADER_RE.captures(line) {
            if let Some(draft) = current.take() {
                agents.push(draft.finish()?);
            }
            let id = parse_id(&caps[1]).with_context(|| format!("line {line_no}"))?;
            current = Some(AgentDraft::new(id, line_no));
            continue;
        }

        let draft = current
            .as_mut()
            .ok_or_else(|| anyhow!("line {line_no}: expected 'Monkey <id>:' header"))?;
        draft
            .apply(line)
            .with_context(|| format!("line {line_no}"))?;
    }
    if let Some(draft) = current.take() {
        agents.push(draft.finish()?);
    }

    agents.sort_by_key(|agent| agent.id);
    let mut seen = BTreeSet::new();
    for agent in &agents {
        if !seen.insert(agent.id) {
            bail!("duplicate agent id {}", agent.id);
        }
    }
    debug!(agents = agents.len(), "notes parsed");
    Ok(agents)
}

/// Fields collected for one block; every field is required.
struct AgentDraft {
    id: AgentId,
    header_line: usize,
    items: Option<Vec<u64>>,
    transform: Option<Transform>,
    divisor: Option<u64>,
    on_pass: Option<AgentId>,
    on_fail: Option<AgentId>,
}

impl AgentDraft {
    fn new(id: AgentId, header_line: usize) -> Self {
        Self {
            id,
            header_line,
            items: None,
            transform: None,
            divisor: None,
            on_pass: None,
            on_fail: None,
        }
    }

    fn apply(&mut self, line: &str) -> Result<()> {
        if let Some(caps) = ITEMS_RE.captures(line) {
            let items = parse_items(&caps[1])?;
            return set_once(&mut self.items, items, "Starting items");
        }
        if let Some(caps) = OPERATION_RE.captures(line) {
            let transform = parse_transform(&caps[1], &caps[2])?;
            return set_once(&mut self.transform, transform, "Operation");
        }
        if let Some(caps) = TEST_RE.captures(line) {
            let divisor = parse_number(&caps[1])?;
            return set_once(&mut self.divisor, divisor, "Test");
        }
        if let Some(caps) = BRANCH_RE.captures(line) {
            let target = parse_id(&caps[2])?;
            return match &caps[1] {
                "true" => set_once(&mut self.on_pass, target, "If true"),
                _ => set_once(&mut self.on_fail, target, "If false"),
            };
        }
        bail!("unrecognized line '{line}'")
    }

    fn finish(self) -> Result<Agent> {
        let missing = |field: &str| {
            anyhow!(
                "monkey {} (line {}): missing '{}'",
                self.id,
                self.header_line,
                field
            )
        };
        let items = self.items.ok_or_else(|| missing("Starting items"))?;
        let transform = self.transform.ok_or_else(|| missing("Operation"))?;
        let divisor = self.divisor.ok_or_else(|| missing("Test"))?;
        let on_pass = self.on_pass.ok_or_else(|| missing("If true"))?;
        let on_fail = self.on_fail.ok_or_else(|| missing("If false"))?;
        Ok(Agent::new(
            self.id, items, transform, divisor, on_pass, on_fail,
        ))
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &str) -> Result<()> {
    if slot.is_some() {
        bail!("duplicate '{field}'");
    }
    *slot = Some(value);
    Ok(())
}

fn parse_items(raw: &str) -> Result<Vec<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(|item| parse_number(item.trim())).collect()
}

fn parse_transform(operator: &str, operand: &str) -> Result<Transform> {
    match (operator, operand) {
        ("*", "old") => Ok(Transform::Square),
        ("+", "old") => Ok(Transform::Double),
        ("*", value) => Ok(Transform::Multiply(parse_number(value)?)),
        ("+", value) => Ok(Transform::Add(parse_number(value)?)),
        (other, _) => bail!("unsupported operator '{other}'"),
    }
}

fn parse_id(raw: &str) -> Result<AgentId> {
    raw.parse::<AgentId>()
        .with_context(|| format!("invalid agent id '{raw}'"))
}

fn parse_number(raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .with_context(|| format!("invalid number '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EXAMPLE_NOTES, example_agents};

    #[test]
    fn parses_example_notes() {
        let agents = parse_notes(EXAMPLE_NOTES).expect("parse");
        assert_eq!(agents, example_agents());
    }

    #[test]
    fn parses_empty_item_list_and_double() {
        let notes = "Monkey 0:\n  Starting items:\n  Operation: new = old + old\n  Test: divisible by 5\n    If true: throw to monkey 0\n    If false: throw to monkey 0\n";
        let agents = parse_notes(notes).expect("parse");
        assert!(agents[0].items.is_empty());
        assert_eq!(agents[0].transform, Transform::Double);
    }

    #[test]
    fn sorts_blocks_by_id() {
        let notes = EXAMPLE_NOTES.replace("Monkey 0:", "Monkey 9:");
        let agents = parse_notes(&notes).expect("parse");
        let ids: Vec<AgentId> = agents.iter().map(|agent| agent.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 9]);
    }

    #[test]
    fn rejects_unsupported_operator() {
        let notes = EXAMPLE_NOTES.replace("old * 19", "old - 19");
        let err = parse_notes(&notes).expect_err("operator");
        let message = format!("{err:#}");
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("unsupported operator '-'"), "{message}");
    }

    #[test]
    fn rejects_unrecognized_line() {
        let notes = EXAMPLE_NOTES.replace("Test: divisible by 19", "Test: odd");
        let err = parse_notes(&notes).expect_err("line");
        let message = format!("{err:#}");
        assert!(message.contains("line 11"), "{message}");
        assert!(message.contains("unrecognized line"), "{message}");
    }

    #[test]
    fn rejects_field_before_header() {
        let err = parse_notes("  Starting items: 1\n").expect_err("header");
        assert!(err.to_string().contains("expected 'Monkey <id>:' header"));
    }

    #[test]
    fn rejects_missing_field() {
        let notes = EXAMPLE_NOTES.replace("    If false: throw to monkey 1\n", "");
        let err = parse_notes(&notes).expect_err("missing");
        assert!(err.to_string().contains("monkey 3 (line 22): missing 'If false'"));
    }

    #[test]
    fn rejects_duplicate_field() {
        let notes = EXAMPLE_NOTES.replace(
            "  Test: divisible by 17\n",
            "  Test: divisible by 17\n  Test: divisible by 5\n",
        );
        let err = parse_notes(&notes).expect_err("duplicate");
        assert!(format!("{err:#}").contains("duplicate 'Test'"));
    }

    #[test]
    fn rejects_duplicate_agent_id() {
        let notes = EXAMPLE_NOTES.replace("Monkey 3:", "Monkey 2:");
        let err = parse_notes(&notes).expect_err("duplicate id");
        assert!(err.to_string().contains("duplicate agent id 2"));
    }

    #[test]
    fn rejects_non_numeric_items() {
        let notes = EXAMPLE_NOTES.replace("79, 98", "79, x");
        let err = parse_notes(&notes).expect_err("items");
        assert!(format!("{err:#}").contains("invalid number 'x'"));
    }

    #[test]
    fn rejects_agent_id_beyond_usize() {
        let notes = EXAMPLE_NOTES.replace("Monkey 3:", "Monkey 99999999999999999999999:");
        let err = parse_notes(&notes).expect_err("id");
        let message = format!("{err:#}");
        assert!(message.contains("line 22"), "{message}");
        assert!(
            message.contains("invalid agent id '99999999999999999999999'"),
            "{message}"
        );
    }

    #[test]
    fn rejects_route_beyond_usize() {
        let notes = EXAMPLE_NOTES.replace(
            "If true: throw to monkey 0",
            "If true: throw to monkey 99999999999999999999999",
        );
        let err = parse_notes(&notes).expect_err("route");
        assert!(format!("{err:#}").contains("invalid agent id"));
    }

    #[test]
    fn load_notes_reports_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing.txt");
        let err = load_notes(&path).expect_err("missing");
        assert!(err.to_string().contains("read notes"));
    }
}
