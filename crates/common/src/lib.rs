//! Shared process-level helpers for the evaluation API crates.
//!
//! - `utils::logging`: tracing subscriber setup (compact or JSON).
//! - `env`: startup checks for directories the storage layer writes into.

pub mod env;
pub mod utils;
