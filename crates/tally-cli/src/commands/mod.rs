//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `app` - Shared utilities (open_db, open_app) and init
//! - `expenses` - Expense commands (suggest, add, list, delete, totals)
//! - `budgets` - Budget commands (set, list)
//! - `learned` - Learned-state dump

pub mod app;
pub mod budgets;
pub mod expenses;
pub mod learned;

// Re-export command functions for main.rs
pub use app::*;
pub use budgets::*;
pub use expenses::*;
pub use learned::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
