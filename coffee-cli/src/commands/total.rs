//! Total command - show a user's coffee count and amount owed

use anyhow::{Context, Result};
use colored::Colorize;

use super::{get_context, resolve_user};
use crate::output::{create_table, format_amount, format_count};

pub async fn run(user: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let username = resolve_user(&ctx, user)?;

    let balance = ctx
        .coffee_service
        .balance(&username)
        .await
        .with_context(|| format!("Failed to fetch total for '{}'", username))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&balance)?);
        return Ok(());
    }

    let mut table = create_table();
    table.add_row(vec!["User", &balance.username]);
    table.add_row(vec!["Coffees", &format_count(balance.coffee_count)]);
    table.add_row(vec![
        "Unit price",
        &format_amount(ctx.app_config.unit_price),
    ]);
    table.add_row(vec!["Amount owed", &format_amount(balance.amount_owed)]);
    println!("{}", table);

    if balance.is_guest {
        println!("{}", "Guest account".dimmed());
    }

    Ok(())
}
