//! Tally CLI - Expense tracker with learned category suggestions
//!
//! Usage:
//!   tally init                               Initialize database
//!   tally suggest "Uber ride to airport"     Suggest category and amount
//!   tally add -d "Uber ride" -a 450          Add an expense (category suggested)
//!   tally budget set Food 5000               Set a category budget

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tally_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Suggest { description } => {
            let app = commands::open_app(&db_path, &config)?;
            commands::cmd_suggest(&app, &description)
        }
        Commands::Add {
            description,
            amount,
            category,
        } => {
            let app = commands::open_app(&db_path, &config)?;
            commands::cmd_add(&app, &description, amount, category.as_deref()).map(|_| ())
        }
        Commands::List { limit, search } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_list(&db, limit, search.as_deref())
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Totals => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_totals(&db)
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                Some(BudgetAction::Set { category, limit }) => {
                    commands::cmd_budget_set(&db, &category, limit)
                }
                None => commands::cmd_budget_list(&db),
            }
        }
        Commands::Learned { json } => {
            let app = commands::open_app(&db_path, &config)?;
            commands::cmd_learned(&app, json)
        }
    }
}
