//! I/O helpers for keepaway commands.

pub mod config;
pub mod notes;
