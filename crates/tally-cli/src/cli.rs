//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track expenses with learned category suggestions
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Expense tracker that learns how you categorize spending", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the path in the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/tally/config/tally.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Suggest a category and amount for a description
    Suggest {
        /// Expense description
        description: String,
    },

    /// Add an expense and learn from it
    Add {
        /// Expense description
        #[arg(short, long)]
        description: String,

        /// Amount spent (negative for refunds)
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,

        /// Category (suggested from the description if omitted)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only show expenses whose description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete an expense (learned suggestions are kept)
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Show spending totals by category
    Totals,

    /// Manage category budgets
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Show what has been learned from past expenses
    Learned {
        /// Print the learned state as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the budget limit for a category
    Set {
        /// Category name
        category: String,

        /// Budget limit
        limit: f64,
    },
}
