//! Budget command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::BudgetLevel;

pub fn cmd_budget_set(db: &Database, category: &str, limit: f64) -> Result<()> {
    if category.trim().is_empty() {
        anyhow::bail!("Category cannot be empty");
    }
    db.set_budget(category, limit)?;
    println!("✅ {} budget set to {:.2}", category, limit);
    Ok(())
}

pub fn cmd_budget_list(db: &Database) -> Result<()> {
    let statuses = db.all_budget_statuses()?;

    if statuses.is_empty() {
        println!("No budgets set. Use 'tally budget set <category> <limit>'.");
        return Ok(());
    }

    println!();
    println!("💵 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for status in &statuses {
        let marker = match status.level() {
            BudgetLevel::Exceeded => "🔴",
            BudgetLevel::Warning => "🟡",
            BudgetLevel::UnderBudget => "🟢",
        };
        println!(
            "   {} {:<20} {:>10.2} / {:>10.2}  ({:.0}%, {:.2} left)",
            marker,
            status.category,
            status.spent,
            status.limit,
            status.percent_used(),
            status.remaining()
        );
    }

    Ok(())
}
