//! Pay command - how to settle a user's balance

use anyhow::{Context, Result};
use colored::Colorize;

use super::{get_context, resolve_user};
use crate::output::{self, format_amount};

pub async fn run(user: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let username = resolve_user(&ctx, user)?;

    let request = ctx
        .coffee_service
        .payment_request(&username)
        .await
        .with_context(|| format!("Failed to fetch balance for '{}'", username))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    if request.amount.is_zero() {
        output::success(&format!("{} owes nothing.", request.username));
        return Ok(());
    }

    println!(
        "{} owes {}",
        request.username.bold(),
        format_amount(request.amount).bold()
    );
    println!();
    println!("  Pay to:   {}", request.payee_name);
    println!("  Phone:    {}", request.payee_phone_number);
    println!("  Comment:  {}", request.comments);
    println!();
    println!(
        "{}",
        format!(
            "After paying, run 'coffee reset {}' to clear the balance.",
            request.username
        )
        .dimmed()
    );

    Ok(())
}
