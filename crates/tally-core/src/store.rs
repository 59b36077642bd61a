//! Storage seam between the categorizer and wherever expenses live

use crate::error::Result;
use crate::models::Expense;

/// The read side the categorizer needs to rebuild learned state.
/// [`crate::db::Database`] is the SQLite implementation.
pub trait ExpenseStore {
    /// All expenses, oldest first
    fn expenses_in_order(&self) -> Result<Vec<Expense>>;
}
