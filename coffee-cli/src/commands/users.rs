//! Users command - list the roster from the backend

use anyhow::{Context, Result};
use colored::Colorize;
use coffee_core::domain::is_guest;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let users = ctx
        .coffee_service
        .list_users()
        .await
        .context("Failed to fetch users")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        output::warning("No users on the roster.");
        return Ok(());
    }

    println!("{}", ctx.app_config.title.bold());
    println!();
    for user in &users {
        if is_guest(&user.username) {
            println!("  • {} {}", user.username, "(guest)".dimmed());
        } else {
            println!("  • {}", user.username);
        }
    }
    println!();
    println!("{} users", users.len());

    Ok(())
}
