//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetStatus};

impl Database {
    /// Set (or replace) the budget limit for a category
    pub fn set_budget(&self, category: &str, limit: f64) -> Result<()> {
        if !limit.is_finite() {
            return Err(Error::InvalidData(format!(
                "Budget limit must be a finite number, got {}",
                limit
            )));
        }
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO budgets (category, budget_limit) VALUES (?, ?)",
            params![category, limit],
        )?;
        Ok(())
    }

    /// Budget limit for a category, if one is set
    pub fn get_budget(&self, category: &str) -> Result<Option<f64>> {
        let conn = self.conn()?;
        let limit = conn
            .query_row(
                "SELECT budget_limit FROM budgets WHERE category = ?",
                params![category],
                |row| row.get(0),
            )
            .optional()?;
        Ok(limit)
    }

    /// All budgets, ordered by category
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT category, budget_limit FROM budgets ORDER BY category")?;
        let budgets = stmt
            .query_map([], |row| {
                Ok(Budget {
                    category: row.get(0)?,
                    limit: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    /// Spending against the budget for one category (None when no budget is set)
    pub fn budget_status(&self, category: &str) -> Result<Option<BudgetStatus>> {
        let limit = match self.get_budget(category)? {
            Some(limit) => limit,
            None => return Ok(None),
        };
        let spent = self.category_spent(category)?;
        Ok(Some(BudgetStatus {
            category: category.to_string(),
            limit,
            spent,
        }))
    }

    /// Spending against every budget, ordered by category
    pub fn all_budget_statuses(&self) -> Result<Vec<BudgetStatus>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT b.category, b.budget_limit, COALESCE(SUM(e.amount), 0)
            FROM budgets b
            LEFT JOIN expenses e ON e.category = b.category
            GROUP BY b.category, b.budget_limit
            ORDER BY b.category
            "#,
        )?;
        let statuses = stmt
            .query_map([], |row| {
                Ok(BudgetStatus {
                    category: row.get(0)?,
                    limit: row.get(1)?,
                    spent: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(statuses)
    }
}
