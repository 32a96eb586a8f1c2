//! Config command - show deployment constants and manage settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use coffee_core::config::{app_config, Settings, DEFAULT_BASE_URL};

use super::get_data_dir;
use crate::output::{create_table, format_amount};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show configuration (default)
    Show,
    /// Point the client at a different backend endpoint
    SetUrl {
        /// Backend URL, without query string
        url: String,
    },
    /// Go back to the built-in backend endpoint
    ClearUrl,
    /// Set the user commands act on when none is given
    SetUser {
        /// Username or GitHub login
        user: String,
    },
}

pub fn run(command: Option<ConfigCommands>, json: bool) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut settings = Settings::load(&data_dir)?;

    match command {
        Some(ConfigCommands::SetUrl { url }) => {
            settings.set_backend_url(&url)?;
            settings.save(&data_dir)?;
            println!("{} Backend set to {}", "✓".green(), url);
        }
        Some(ConfigCommands::ClearUrl) => {
            settings.clear_backend_url();
            settings.save(&data_dir)?;
            println!("{} Backend reset to the built-in endpoint", "✓".green());
        }
        Some(ConfigCommands::SetUser { user }) => {
            let username = coffee_core::find_existing_user(&user)
                .map(|u| u.username.to_string())
                .unwrap_or(user);
            settings.default_user = Some(username.clone());
            settings.save(&data_dir)?;
            println!("{} Default user set to {}", "✓".green(), username.bold());
        }
        Some(ConfigCommands::Show) | None => show(&settings, json)?,
    }

    Ok(())
}

fn show(settings: &Settings, json: bool) -> Result<()> {
    let config = app_config();
    let base_url = settings.base_url();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "app": config,
                "settings": settings,
                "backendUrl": base_url,
            }))?
        );
        return Ok(());
    }

    println!("{}", config.title.bold());
    println!();

    let mut table = create_table();
    table.add_row(vec!["Organization", &config.allowed_org]);
    table.add_row(vec!["Site ID", &config.netlify_site_id]);
    table.add_row(vec!["Unit price", &format_amount(config.unit_price)]);
    table.add_row(vec!["Payee", &config.payee_name]);
    table.add_row(vec!["Payee phone", &config.payee_phone_number]);
    table.add_row(vec!["Payment comment", &config.payment_comments]);
    table.add_row(vec!["Guests", &config.guest_user_ids.join(", ")]);
    table.add_row(vec![
        "Default user",
        settings.default_user.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec!["Backend", &base_url]);
    println!("{}", table);

    if base_url != DEFAULT_BASE_URL {
        println!("{}", "Using a custom backend endpoint".yellow());
    }

    Ok(())
}
