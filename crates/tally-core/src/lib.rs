//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Categorization engine that suggests a category and amount for an
//!   expense description and learns from confirmed expenses
//! - Built-in keyword rules used when nothing has been learned
//! - SQLite expense and budget store
//! - Configuration loading

pub mod categorizer;
pub mod config;
pub mod db;
pub mod error;
pub mod keywords;
pub mod models;
pub mod store;

pub use categorizer::{
    Categorizer, CategoryAmountHistory, LearnedAssociation, LearnedSnapshot, MatchPolicy,
    ReplayResult, Suggestion, SuggestionSource, DEFAULT_CATEGORY,
};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use keywords::{KeywordRule, KEYWORD_RULES};
pub use models::{Budget, BudgetLevel, BudgetStatus, CategoryTotal, Expense, NewExpense};
pub use store::ExpenseStore;
