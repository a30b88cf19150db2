//! Stable exit codes for keepaway CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Notes, config or population were invalid, or a run failed.
pub const INVALID: i32 = 1;
/// More top inspection counts were requested than agents exist.
pub const RANGE: i32 = 2;
