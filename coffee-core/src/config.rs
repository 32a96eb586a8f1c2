//! Configuration
//!
//! Two layers:
//! - [`AppConfig`]: compiled-in deployment constants (title, payee, unit price).
//! - [`Settings`]: per-machine settings.json in the data directory:
//! ```json
//! { "backendUrl": "https://...", "defaultUser": "mandar" }
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::domain::GUEST_USER_IDS;

/// Apps Script web app that owns the coffee spreadsheet
pub const DEFAULT_BASE_URL: &str = "https://script.google.com/macros/s/AKfycbym-ODmhPDbYIfd0oSaD2FYdtZCbpNyPWctBOQmu3C-_LbJQADixgXg-So8foXMXdSR/exec";

/// Environment variable to override the backend endpoint.
/// Set this to point the client at a staging deployment or a mock server.
pub const BASE_URL_ENV: &str = "COFFEE_LOGGER_BASE_URL";

/// Environment variable to override the data directory
pub const DATA_DIR_ENV: &str = "COFFEE_LOGGER_DIR";

/// Deployment constants
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub title: String,
    pub netlify_site_id: String,
    pub allowed_org: String,
    pub guest_user_ids: Vec<String>,
    pub unit_price: Decimal,
    pub payee_phone_number: String,
    pub payee_name: String,
    pub payment_comments: String,
}

impl AppConfig {
    fn arl() -> Self {
        Self {
            title: "ARL Productivity Logger".to_string(),
            netlify_site_id: "154a9f66-7459-4468-bae8-1f43798c1334".to_string(),
            allowed_org: "org-arl".to_string(),
            guest_user_ids: GUEST_USER_IDS.iter().map(|g| g.to_string()).collect(),
            unit_price: Decimal::new(60, 2),
            payee_phone_number: "+6581982143".to_string(),
            payee_name: "Kee".to_string(),
            payment_comments: "ARL Coffee".to_string(),
        }
    }
}

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// The deployment configuration, built on first use
pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::arl)
}

/// Resolve the data directory from `COFFEE_LOGGER_DIR` or `~/.coffee-logger`
pub fn default_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".coffee-logger"))
        .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))
}

/// Per-machine settings (settings.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

impl Settings {
    /// Load settings from the data directory
    ///
    /// A missing or unreadable settings.json yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    /// Save settings to the data directory
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let settings_path = data_dir.join("settings.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Effective backend endpoint
    ///
    /// `COFFEE_LOGGER_BASE_URL` wins over settings.json, which wins over
    /// the compiled-in endpoint.
    pub fn base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Override the backend endpoint
    pub fn set_backend_url(&mut self, url: &str) -> DomainResult<()> {
        let parsed = Url::parse(url)
            .map_err(|e| DomainError::Config(format!("Invalid backend URL '{}': {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::Config(format!(
                "Backend URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() {
            return Err(DomainError::Config(
                "Backend URL must not contain a query string".to_string(),
            ));
        }

        self.backend_url = Some(url.to_string());
        Ok(())
    }

    /// Go back to the compiled-in endpoint
    pub fn clear_backend_url(&mut self) {
        self.backend_url = None;
    }
}
