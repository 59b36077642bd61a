//! Expense operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::keywords::normalize;
use crate::models::{CategoryTotal, Expense, NewExpense};
use crate::store::ExpenseStore;

const EXPENSE_COLUMNS: &str = "id, description, category, amount, created_at";

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let created_at_str: String = row.get(4)?;
    Ok(Expense {
        id: row.get(0)?,
        description: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Insert an expense, returning its id
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (description, category, amount) VALUES (?, ?, ?)",
            params![expense.description, expense.category, expense.amount],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Inserted expense {} ({})", id, expense.category);
        Ok(id)
    }

    /// Get a single expense
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS),
                params![id],
                expense_from_row,
            )
            .optional()?;
        Ok(expense)
    }

    /// List expenses, newest first
    pub fn list_expenses(&self, limit: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY id DESC LIMIT ?",
            EXPENSE_COLUMNS
        ))?;
        let expenses = stmt
            .query_map(params![limit], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// List expenses whose description contains `query` (case-insensitive), newest first
    ///
    /// The query is matched as plain text. Case folding is the same as the
    /// categorizer's, so non-ASCII descriptions match too.
    pub fn search_expenses(&self, query: &str, limit: i64) -> Result<Vec<Expense>> {
        let needle = normalize(query);
        // Negative limits mean "no limit", as in SQLite
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE description IS NOT NULL ORDER BY id DESC",
            EXPENSE_COLUMNS
        ))?;

        let mut found = Vec::new();
        for expense in stmt.query_map([], expense_from_row)? {
            if found.len() >= limit {
                break;
            }
            let expense = expense?;
            let matches = expense
                .description
                .as_deref()
                .is_some_and(|d| normalize(d).contains(&needle));
            if matches {
                found.push(expense);
            }
        }
        Ok(found)
    }

    /// All expenses, oldest first
    pub fn all_expenses_in_order(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY id ASC",
            EXPENSE_COLUMNS
        ))?;
        let expenses = stmt
            .query_map([], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Delete an expense
    ///
    /// Learned associations built from this expense are not retracted.
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {}", id)));
        }
        Ok(())
    }

    /// Count all expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Sum of amounts grouped by category, largest total first
    pub fn category_totals(&self) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS total, COUNT(*) AS count
            FROM expenses
            GROUP BY category
            ORDER BY total DESC, category
            "#,
        )?;
        let totals = stmt
            .query_map([], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(totals)
    }

    /// Sum of amounts for one category (0 when there are none)
    pub fn category_spent(&self, category: &str) -> Result<f64> {
        let conn = self.conn()?;
        let spent = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE category = ?",
            params![category],
            |row| row.get(0),
        )?;
        Ok(spent)
    }

    /// Sum of all expense amounts
    pub fn total_spent(&self) -> Result<f64> {
        let conn = self.conn()?;
        let total = conn.query_row("SELECT COALESCE(SUM(amount), 0) FROM expenses", [], |row| {
            row.get(0)
        })?;
        Ok(total)
    }
}

impl ExpenseStore for Database {
    fn expenses_in_order(&self) -> Result<Vec<Expense>> {
        self.all_expenses_in_order()
    }
}
