//! Whois command - look up a member by GitHub login

use anyhow::Result;
use colored::Colorize;
use coffee_core::find_existing_user;

pub fn run(github_login: &str, json: bool) -> Result<()> {
    let found = find_existing_user(github_login);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    match found {
        Some(user) => {
            println!("{} -> {}", user.github_login, user.username.bold());
        }
        None => {
            println!(
                "{}",
                format!("No member signed in as '{}'", github_login).yellow()
            );
        }
    }

    Ok(())
}
