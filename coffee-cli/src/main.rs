//! Coffee Logger CLI - log and settle office coffee from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, log, logs, pay, reset, tally, total, users, whois};

/// Coffee Logger - log coffees and see what you owe
#[derive(Parser)]
#[command(name = "coffee", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users on the roster
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a member by GitHub login
    Whois {
        /// GitHub login to look up
        github_login: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's coffee count and amount owed
    Total {
        /// Username or GitHub login (defaults to the configured user)
        user: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log coffees for a user
    Log {
        /// Username or GitHub login (defaults to the configured user)
        user: Option<String>,
        /// Number of coffees
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset a user's coffee data
    Reset {
        /// Username or GitHub login
        user: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show every user's coffee count and amount owed
    Tally {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show payment details to settle a user's balance
    Pay {
        /// Username or GitHub login (defaults to the configured user)
        user: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<config::ConfigCommands>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Users { .. } => "users",
            Commands::Whois { .. } => "whois",
            Commands::Total { .. } => "total",
            Commands::Log { .. } => "log",
            Commands::Reset { .. } => "reset",
            Commands::Tally { .. } => "tally",
            Commands::Pay { .. } => "pay",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command_name = cli.command.name();

    let result = run(cli).await;

    // Opened after the command so only one connection touches logs.duckdb at a time
    let logger = commands::get_logger();

    match result {
        Ok(()) => {
            commands::log_command(&logger, command_name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            commands::log_failure(&logger, command_name, &e);
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Users { json } => users::run(json).await,
        Commands::Whois { github_login, json } => whois::run(&github_login, json),
        Commands::Total { user, json } => total::run(user, json).await,
        Commands::Log { user, count, json } => log::run(user, count, json).await,
        Commands::Reset { user, force } => reset::run(&user, force).await,
        Commands::Tally { json } => tally::run(json).await,
        Commands::Pay { user, json } => pay::run(user, json).await,
        Commands::Config { command, json } => config::run(command, json),
        Commands::Logs { command } => logs::run(command),
    }
}
