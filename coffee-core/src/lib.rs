//! Coffee Logger Core - logic for the ARL coffee logger
//!
//! Follows a hexagonal layout:
//!
//! - **domain**: user directory, roster users, balances
//! - **ports**: the `CoffeeBackend` trait
//! - **adapters**: Apps Script HTTP client
//! - **services**: coffee orchestration and event logging

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::apps_script::AppsScriptClient;
use config::{app_config, AppConfig, Settings};
use ports::CoffeeBackend;
use services::CoffeeService;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{find_existing_user, Balance, PaymentRequest, User, UserMapping};
pub use services::{EntryPoint, LogEntry, LogEvent, LoggingService};

/// Main context for coffee operations
///
/// Wires the settings, the backend client and the services together.
pub struct CoffeeContext {
    pub app_config: &'static AppConfig,
    pub settings: Settings,
    pub coffee_service: CoffeeService,
}

impl CoffeeContext {
    /// Create a context talking to the endpoint the settings resolve to
    pub fn new(data_dir: &Path) -> Result<Self> {
        let settings = Settings::load(data_dir)?;
        let base_url = settings.base_url();
        let client = AppsScriptClient::new(&base_url)
            .with_context(|| format!("Failed to create backend client for {}", base_url))?;

        Ok(Self::with_backend(settings, Arc::new(client)))
    }

    /// Create a context over an arbitrary backend
    pub fn with_backend(settings: Settings, backend: Arc<dyn CoffeeBackend>) -> Self {
        let app_config = app_config();
        Self {
            app_config,
            settings,
            coffee_service: CoffeeService::new(backend, app_config),
        }
    }

    /// Username a command acts on
    ///
    /// The explicit argument wins, then `defaultUser` from settings. GitHub
    /// logins are mapped to roster usernames.
    pub fn resolve_user(&self, user: Option<&str>) -> CoreResult<String> {
        let input = user
            .or(self.settings.default_user.as_deref())
            .ok_or_else(|| {
                Error::validation(
                    "No user given. Pass a username or run 'coffee config set-user <user>'",
                )
            })?;
        Ok(self.coffee_service.resolve_username(input))
    }
}
