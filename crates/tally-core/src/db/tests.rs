//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::ExpenseStore;
    use rusqlite::params;

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_expenses(10).unwrap().is_empty());
        assert_eq!(db.count_expenses().unwrap(), 0);
        assert_eq!(db.total_spent().unwrap(), 0.0);
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('expenses') WHERE name IN ('id', 'description', 'category', 'amount', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 5, "expenses table should have 5 expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('budgets') WHERE name IN ('category', 'budget_limit')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 2, "budgets table should have 2 expected columns");
    }

    #[test]
    fn test_reopen_runs_migrations_idempotently() {
        let db = Database::in_memory().unwrap();
        db.insert_expense(&NewExpense::new("coffee", "Food", 3.5))
            .unwrap();

        let reopened = Database::open(db.path()).unwrap();
        assert_eq!(reopened.count_expenses().unwrap(), 1);
    }

    #[test]
    fn test_expense_crud() {
        let db = Database::in_memory().unwrap();

        let id = db
            .insert_expense(&NewExpense::new("Uber ride", "Transport", 450.0))
            .unwrap();
        assert!(id > 0);

        let expense = db.get_expense(id).unwrap().unwrap();
        assert_eq!(expense.description.as_deref(), Some("Uber ride"));
        assert_eq!(expense.category.as_deref(), Some("Transport"));
        assert_eq!(expense.amount, 450.0);

        db.delete_expense(id).unwrap();
        assert!(db.get_expense(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_expense() {
        let db = Database::in_memory().unwrap();
        let result = db.delete_expense(42);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_newest_first_and_ordered_replay() {
        let db = Database::in_memory().unwrap();
        for (desc, amount) in [("first", 1.0), ("second", 2.0), ("third", 3.0)] {
            db.insert_expense(&NewExpense::new(desc, "Misc", amount))
                .unwrap();
        }

        let listed = db.list_expenses(2).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].description.as_deref(), Some("third"));
        assert_eq!(listed[1].description.as_deref(), Some("second"));

        let ordered = db.expenses_in_order().unwrap();
        let descs: Vec<_> = ordered
            .iter()
            .filter_map(|e| e.description.as_deref())
            .collect();
        assert_eq!(descs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let db = Database::in_memory().unwrap();
        db.insert_expense(&NewExpense::new("Uber ride to airport", "Transport", 450.0))
            .unwrap();
        db.insert_expense(&NewExpense::new("Pizza", "Food", 300.0))
            .unwrap();

        let found = db.search_expenses("UBER", 10).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category.as_deref(), Some("Transport"));

        assert!(db.search_expenses("nothing", 10).unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_query_as_plain_text() {
        let db = Database::in_memory().unwrap();
        db.insert_expense(&NewExpense::new("coffee", "Food", 120.0))
            .unwrap();
        db.insert_expense(&NewExpense::new("CAFÉ latte", "Food", 180.0))
            .unwrap();
        db.insert_expense(&NewExpense::new("50% off shoes", "Shopping", 900.0))
            .unwrap();

        assert!(db.search_expenses("_", 10).unwrap().is_empty());
        assert!(db.search_expenses("\\", 10).unwrap().is_empty());

        let percent = db.search_expenses("%", 10).unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].description.as_deref(), Some("50% off shoes"));

        let cafe = db.search_expenses("café", 10).unwrap();
        assert_eq!(cafe.len(), 1);
        assert_eq!(cafe[0].description.as_deref(), Some("CAFÉ latte"));
    }

    #[test]
    fn test_search_respects_limit_and_order() {
        let db = Database::in_memory().unwrap();
        for desc in ["bus one", "bus two", "pizza", "bus three"] {
            db.insert_expense(&NewExpense::new(desc, "Misc", 1.0))
                .unwrap();
        }

        let found = db.search_expenses("BUS", 2).unwrap();
        let descs: Vec<_> = found
            .iter()
            .filter_map(|e| e.description.as_deref())
            .collect();
        assert_eq!(descs, vec!["bus three", "bus two"]);
        assert_eq!(db.search_expenses("bus", -1).unwrap().len(), 3);
    }

    #[test]
    fn test_null_columns_round_trip() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO expenses (description, category, amount) VALUES (NULL, NULL, ?)",
            params![12.0],
        )
        .unwrap();

        let expenses = db.all_expenses_in_order().unwrap();
        assert_eq!(expenses.len(), 1);
        assert!(expenses[0].description.is_none());
        assert!(expenses[0].category.is_none());
    }

    #[test]
    fn test_category_totals() {
        let db = Database::in_memory().unwrap();
        db.insert_expense(&NewExpense::new("pizza", "Food", 300.0))
            .unwrap();
        db.insert_expense(&NewExpense::new("burger", "Food", 200.0))
            .unwrap();
        db.insert_expense(&NewExpense::new("uber", "Transport", 450.0))
            .unwrap();

        let totals = db.category_totals().unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category.as_deref(), Some("Food"));
        assert_eq!(totals[0].total, 500.0);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].category.as_deref(), Some("Transport"));

        assert_eq!(db.category_spent("Food").unwrap(), 500.0);
        assert_eq!(db.category_spent("Health").unwrap(), 0.0);
        assert_eq!(db.total_spent().unwrap(), 950.0);
    }

    #[test]
    fn test_budget_set_and_replace() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_budget("Food").unwrap().is_none());

        db.set_budget("Food", 1000.0).unwrap();
        assert_eq!(db.get_budget("Food").unwrap(), Some(1000.0));

        db.set_budget("Food", 1500.0).unwrap();
        assert_eq!(db.get_budget("Food").unwrap(), Some(1500.0));
        assert_eq!(db.list_budgets().unwrap().len(), 1);
    }

    #[test]
    fn test_budget_rejects_non_finite_limit() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            db.set_budget("Food", f64::NAN),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_budget_status() {
        let db = Database::in_memory().unwrap();
        db.set_budget("Food", 1000.0).unwrap();
        db.set_budget("Health", 500.0).unwrap();
        db.insert_expense(&NewExpense::new("pizza", "Food", 850.0))
            .unwrap();

        let status = db.budget_status("Food").unwrap().unwrap();
        assert_eq!(status.spent, 850.0);
        assert_eq!(status.level(), BudgetLevel::Warning);
        assert_eq!(status.remaining(), 150.0);

        assert!(db.budget_status("Transport").unwrap().is_none());

        let all = db.all_budget_statuses().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, "Food");
        assert_eq!(all[1].category, "Health");
        assert_eq!(all[1].spent, 0.0);
        assert_eq!(all[1].level(), BudgetLevel::UnderBudget);
        assert_eq!(all[1].remaining(), 500.0);
    }
}
