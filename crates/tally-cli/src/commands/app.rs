//! Shared command utilities and setup commands
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `open_app` - Open the database and rebuild the categorizer
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{db::Database, Categorizer, Config};
use tracing::debug;

/// The database plus a categorizer rebuilt from it
pub struct App {
    pub db: Database,
    pub engine: Categorizer,
}

/// Open the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

/// Open the database and build the categorizer
///
/// Stored expenses are replayed into the categorizer unless the config
/// turns replay off.
pub fn open_app(db_path: &Path, config: &Config) -> Result<App> {
    let db = open_db(db_path)?;
    let policy = config.categorizer.learned_match;

    let engine = if config.categorizer.replay_on_start {
        Categorizer::from_store(policy, &db).context("Failed to replay stored expenses")?
    } else {
        debug!("Replay disabled; starting with empty learned state");
        Categorizer::new(policy)
    };

    Ok(App { db, engine })
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses()?;

    println!("✅ Database initialized successfully! ({} expenses)", count);
    println!();
    println!("Next steps:");
    println!("  1. Add an expense: tally add -d \"Uber ride to airport\" -a 450");
    println!("  2. Get a suggestion: tally suggest \"uber to office\"");

    Ok(())
}
