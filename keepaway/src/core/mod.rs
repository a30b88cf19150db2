//! Deterministic, pure simulation logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! agent populations and return deterministic outputs suitable for tests.

pub mod agent;
pub mod engine;
pub mod error;
pub mod metric;
pub mod relief;
