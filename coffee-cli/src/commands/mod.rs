//! CLI command implementations

pub mod config;
pub mod log;
pub mod logs;
pub mod pay;
pub mod reset;
pub mod tally;
pub mod total;
pub mod users;
pub mod whois;

use std::path::PathBuf;

use anyhow::{Context, Result};
use coffee_core::config::default_data_dir;
use coffee_core::{CoffeeContext, EntryPoint, LogEvent, LoggingService};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

pub fn log_command(logger: &Option<LoggingService>, command: &str) {
    log_event(logger, LogEvent::new("command_executed").with_command(command));
}

pub fn log_failure(logger: &Option<LoggingService>, command: &str, error: &anyhow::Error) {
    if let Some(l) = logger {
        let _ = l.log_error(command, &error.to_string(), Some(&format!("{:#}", error)));
    }
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    default_data_dir()
}

/// Build the coffee context from settings in the data directory
pub fn get_context() -> Result<CoffeeContext> {
    let data_dir = get_data_dir()?;
    CoffeeContext::new(&data_dir).context("Failed to initialize coffee context")
}

/// Pick the user a command acts on
pub fn resolve_user(ctx: &CoffeeContext, user: Option<String>) -> Result<String> {
    Ok(ctx.resolve_user(user.as_deref())?)
}
