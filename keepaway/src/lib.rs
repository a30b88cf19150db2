//! Deterministic item-inspection simulator.
//!
//! A fixed population of agents passes worry-level items between their
//! queues over discrete rounds. The crate is split the same way throughout:
//!
//! - **[`core`]**: Pure, deterministic logic (agents, relief policies, the
//!   round engine, the business metric). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (reading notes, config files).
//!
//! [`solve`] coordinates core logic with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod solve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
