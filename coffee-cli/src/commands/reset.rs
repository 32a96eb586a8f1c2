//! Reset command - clear a user's coffee data on the backend

use anyhow::{Context, Result};
use colored::Colorize;
use coffee_core::LogEvent;
use dialoguer::Confirm;

use super::{get_context, get_logger, log_event};

pub async fn run(user: &str, force: bool) -> Result<()> {
    let ctx = get_context()?;
    let username = ctx.coffee_service.resolve_username(user);

    // Confirm reset unless --force
    if !force {
        println!(
            "\n{}",
            format!("This will reset all coffee data for '{}'.", username).yellow()
        );
        println!("{}\n", "The backend keeps no copy once it is reset.".dimmed());

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let confirmation = ctx
        .coffee_service
        .reset_user_data(&username)
        .await
        .with_context(|| format!("Failed to reset data for '{}'", username))?;

    log_event(
        &get_logger(),
        LogEvent::new("user_reset")
            .with_command("reset")
            .with_username(&username),
    );

    println!("\n{} Data reset for '{}'", "✓".green(), username);
    if !confirmation.trim().is_empty() {
        println!("{}\n", confirmation.trim().dimmed());
    }

    Ok(())
}
