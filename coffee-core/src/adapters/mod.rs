//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Apps Script HTTP client for the CoffeeBackend port
//! - Mock Apps Script server for wire-level tests

pub mod apps_script;

#[cfg(test)]
pub mod apps_script_mock;
