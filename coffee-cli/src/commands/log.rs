//! Log command - record coffees for a user

use anyhow::{Context, Result};
use colored::Colorize;
use coffee_core::LogEvent;

use super::{get_context, get_logger, log_event, resolve_user};

pub async fn run(user: Option<String>, count: u32, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let username = resolve_user(&ctx, user)?;

    let confirmation = ctx
        .coffee_service
        .log_coffee(&username, count)
        .await
        .with_context(|| format!("Failed to log coffee for '{}'", username))?;

    log_event(
        &get_logger(),
        LogEvent::new("coffee_logged")
            .with_command("log")
            .with_username(&username),
    );

    if json {
        println!(
            "{}",
            serde_json::json!({
                "username": username,
                "coffeeCount": count,
                "confirmation": confirmation,
            })
        );
        return Ok(());
    }

    let noun = if count == 1 { "coffee" } else { "coffees" };
    println!("{} {} {} for {}", "✓".green(), count, noun, username.bold());
    if !confirmation.trim().is_empty() {
        println!("{}", confirmation.trim().dimmed());
    }

    Ok(())
}
