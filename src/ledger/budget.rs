use serde::{Deserialize, Serialize};

/// Spend against a category ceiling, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub category: String,
    /// Absolute amount spent in the category.
    pub spent: f64,
    pub limit: Option<f64>,
    pub percentage: Option<f64>,
}

impl BudgetProgress {
    pub fn new(category: impl Into<String>, expense_total: f64, limit: Option<f64>) -> Self {
        let spent = expense_total.abs();
        Self {
            category: category.into(),
            spent,
            limit,
            percentage: limit.and_then(|limit| progress_percentage(spent, limit)),
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.limit.map_or(false, |limit| self.spent > limit)
    }
}

/// `100 * spent / limit`; undefined unless the limit is positive.
///
/// Expense totals are stored negative, so the magnitude of `expense` is used.
pub fn progress_percentage(expense: f64, limit: f64) -> Option<f64> {
    if limit > 0.0 {
        Some(100.0 * expense.abs() / limit)
    } else {
        None
    }
}
