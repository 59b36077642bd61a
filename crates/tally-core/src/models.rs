//! Data models for Tally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored expense row
///
/// Description and category are nullable in the store, so rows written by
/// other tools may lack them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// An expense to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub category: String,
    pub amount: f64,
}

impl NewExpense {
    pub fn new(description: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
            amount,
        }
    }
}

/// Sum of expense amounts for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// None for rows stored without a category
    pub category: Option<String>,
    pub total: f64,
    pub count: i64,
}

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
}

/// How close a category is to its budget limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    /// Below 80% of the limit (or no positive limit set)
    UnderBudget,
    /// At or above 80% of the limit
    Warning,
    /// At or above the limit
    Exceeded,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderBudget => "under_budget",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

/// Percentage of the limit at which a budget enters the warning level
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;

/// Budget limit compared with what has been spent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
}

impl BudgetStatus {
    /// Spent as a percentage of the limit (0 when the limit is not positive)
    pub fn percent_used(&self) -> f64 {
        if self.limit <= 0.0 {
            return 0.0;
        }
        self.spent / self.limit * 100.0
    }

    pub fn level(&self) -> BudgetLevel {
        let pct = self.percent_used();
        if pct >= 100.0 {
            BudgetLevel::Exceeded
        } else if pct >= BUDGET_WARNING_PERCENT {
            BudgetLevel::Warning
        } else {
            BudgetLevel::UnderBudget
        }
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(limit: f64, spent: f64) -> BudgetStatus {
        BudgetStatus {
            category: "Food".to_string(),
            limit,
            spent,
        }
    }

    #[test]
    fn test_budget_levels() {
        assert_eq!(status(1000.0, 0.0).level(), BudgetLevel::UnderBudget);
        assert_eq!(status(1000.0, 799.0).level(), BudgetLevel::UnderBudget);
        assert_eq!(status(1000.0, 800.0).level(), BudgetLevel::Warning);
        assert_eq!(status(1000.0, 999.99).level(), BudgetLevel::Warning);
        assert_eq!(status(1000.0, 1000.0).level(), BudgetLevel::Exceeded);
        assert_eq!(status(1000.0, 2500.0).level(), BudgetLevel::Exceeded);
    }

    #[test]
    fn test_non_positive_limit_never_alerts() {
        assert_eq!(status(0.0, 500.0).level(), BudgetLevel::UnderBudget);
        assert_eq!(status(-10.0, 500.0).percent_used(), 0.0);
    }

    #[test]
    fn test_percent_and_remaining() {
        let s = status(400.0, 100.0);
        assert!((s.percent_used() - 25.0).abs() < f64::EPSILON);
        assert!((s.remaining() - 300.0).abs() < f64::EPSILON);
    }
}
