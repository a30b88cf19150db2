//! Run configuration stored in `keepaway.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::relief::ReliefPolicy;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "keepaway.toml";

/// Keepaway configuration (TOML).
///
/// Missing fields default to the two standard puzzle parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeepawayConfig {
    /// Number of highest inspection counts multiplied into the metric.
    pub top_k: usize,

    pub part_one: PartConfig,

    pub part_two: PartConfig,
}

/// Round count and relief policy for one run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartConfig {
    pub rounds: u32,
    pub relief: ReliefPolicy,
}

impl PartConfig {
    pub fn part_one() -> Self {
        Self {
            rounds: 20,
            relief: ReliefPolicy::DivideByThree,
        }
    }

    pub fn part_two() -> Self {
        Self {
            rounds: 10_000,
            relief: ReliefPolicy::ModuloBasis,
        }
    }
}

impl Default for KeepawayConfig {
    fn default() -> Self {
        Self {
            top_k: 2,
            part_one: PartConfig::part_one(),
            part_two: PartConfig::part_two(),
        }
    }
}

impl KeepawayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(anyhow!("top_k must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `KeepawayConfig::default()`.
pub fn load_config(path: &Path) -> Result<KeepawayConfig> {
    if !path.exists() {
        let cfg = KeepawayConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: KeepawayConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &KeepawayConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, KeepawayConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("keepaway.toml");
        let cfg = KeepawayConfig {
            top_k: 3,
            part_one: PartConfig {
                rounds: 5,
                relief: ReliefPolicy::ModuloBasis,
            },
            ..KeepawayConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("keepaway.toml");
        fs::write(&path, "[part_two]\nrounds = 50\nrelief = \"divide_by_three\"\n")
            .expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.top_k, 2);
        assert_eq!(cfg.part_one, PartConfig::part_one());
        assert_eq!(
            cfg.part_two,
            PartConfig {
                rounds: 50,
                relief: ReliefPolicy::DivideByThree,
            }
        );
    }

    #[test]
    fn rejects_zero_top_k() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("keepaway.toml");
        fs::write(&path, "top_k = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("top_k must be > 0"));
    }

    #[test]
    fn rejects_unknown_relief() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("keepaway.toml");
        fs::write(&path, "[part_one]\nrounds = 1\nrelief = \"halve\"\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(err.to_string().contains("parse"));
    }
}
