//! Tally command - every user's coffee count and amount owed

use anyhow::{Context, Result};
use colored::Colorize;
use rust_decimal::Decimal;

use super::get_context;
use crate::output::{self, create_table, format_amount, format_count};

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let spinner = (!json).then(|| output::spinner("Fetching balances..."));
    let result = ctx.coffee_service.tally().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let balances = result.context("Failed to build tally")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&balances)?);
        return Ok(());
    }

    if balances.is_empty() {
        output::warning("No users on the roster.");
        return Ok(());
    }

    println!("{}", ctx.app_config.title.bold());
    println!();

    let mut table = create_table();
    table.set_header(vec!["User", "Coffees", "Owed", ""]);

    let mut total_count = Decimal::ZERO;
    let mut total_owed = Decimal::ZERO;
    for balance in &balances {
        total_count += balance.coffee_count;
        total_owed += balance.amount_owed;
        let marker = if balance.is_guest { "guest" } else { "" };
        table.add_row(vec![
            balance.username.clone(),
            format_count(balance.coffee_count),
            format_amount(balance.amount_owed),
            marker.to_string(),
        ]);
    }
    table.add_row(vec![
        "Total".to_string(),
        format_count(total_count),
        format_amount(total_owed),
        String::new(),
    ]);

    println!("{}", table);
    println!(
        "{}",
        format!(
            "{} per coffee",
            format_amount(ctx.app_config.unit_price)
        )
        .dimmed()
    );

    Ok(())
}
