//! Expense command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::{BudgetLevel, NewExpense};

use super::{truncate, App};

pub fn cmd_suggest(app: &App, description: &str) -> Result<()> {
    let suggestion = app.engine.explain(description);
    let amount = app.engine.suggest_amount(description);

    let reason = match &suggestion.matched {
        Some(matched) => format!("{} '{}'", suggestion.source.as_str(), matched),
        None => suggestion.source.as_str().to_string(),
    };

    println!("💡 Category: {} ({})", suggestion.category, reason);
    println!("   Amount:   {:.2}", amount);

    Ok(())
}

/// Store an expense and learn from it, returning the new expense id
pub fn cmd_add(
    app: &App,
    description: &str,
    amount: f64,
    category: Option<&str>,
) -> Result<i64> {
    if description.trim().is_empty() {
        anyhow::bail!("Description cannot be empty");
    }
    if !amount.is_finite() {
        anyhow::bail!("Amount must be a finite number, got {}", amount);
    }

    let category = match category {
        Some(c) if c.trim().is_empty() => anyhow::bail!("Category cannot be empty"),
        Some(c) => c.to_string(),
        None => {
            let suggested = app.engine.suggest_category(description);
            println!("💡 Using suggested category: {}", suggested);
            suggested
        }
    };

    let id = app
        .db
        .insert_expense(&NewExpense::new(description, category.as_str(), amount))?;
    app.engine.learn(description, &category, amount);

    println!("✅ Added expense {} ({}: {:.2})", id, category, amount);

    if let Some(status) = app.db.budget_status(&category)? {
        match status.level() {
            BudgetLevel::Exceeded => println!(
                "⚠️  Budget exceeded! {} spent {:.2} of {:.2} ({:.0}%)",
                category,
                status.spent,
                status.limit,
                status.percent_used()
            ),
            BudgetLevel::Warning => println!(
                "⚠️  {} is at {:.0}% of budget ({:.2} of {:.2})",
                category,
                status.percent_used(),
                status.spent,
                status.limit
            ),
            BudgetLevel::UnderBudget => {}
        }
    }

    Ok(id)
}

pub fn cmd_list(db: &Database, limit: i64, search: Option<&str>) -> Result<()> {
    let expenses = match search {
        Some(query) if !query.is_empty() => db.search_expenses(query, limit)?,
        _ => db.list_expenses(limit)?,
    };

    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!();
    println!("💸 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:>5}  {:<36} {:<16} {:>10}", "ID", "Description", "Category", "Amount");

    for expense in &expenses {
        println!(
            "   {:>5}  {:<36} {:<16} {:>10.2}",
            expense.id,
            truncate(expense.description.as_deref().unwrap_or("-"), 36),
            truncate(expense.category.as_deref().unwrap_or("-"), 16),
            expense.amount
        );
    }

    let shown: f64 = expenses.iter().map(|e| e.amount).sum();
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total shown: {:.2}", shown);

    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_expense(id)?;
    println!("🗑️  Deleted expense {}", id);
    Ok(())
}

pub fn cmd_totals(db: &Database) -> Result<()> {
    let totals = db.category_totals()?;

    if totals.is_empty() {
        println!("No expenses yet. Add one with 'tally add'.");
        return Ok(());
    }

    println!();
    println!("📊 Spending by Category");
    println!("   ─────────────────────────────────────");

    for total in &totals {
        println!(
            "   {:<20} {:>12.2}  ({} expenses)",
            truncate(total.category.as_deref().unwrap_or("(none)"), 20),
            total.total,
            total.count
        );
    }

    println!("   ─────────────────────────────────────");
    println!("   {:<20} {:>12.2}", "Total", db.total_spent()?);

    Ok(())
}
