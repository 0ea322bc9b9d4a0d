use crate::{
    core::{
        aggregator::aggregate,
        stores::{BudgetLimits, CategoryStore, LedgerStore},
    },
    ledger::BudgetProgress,
};

/// Joins expense totals with the user's limits at display time.
#[derive(Clone)]
pub struct BudgetPlanner {
    ledger: LedgerStore,
    categories: CategoryStore,
    limits: BudgetLimits,
}

impl BudgetPlanner {
    pub fn new(ledger: LedgerStore, categories: CategoryStore, limits: BudgetLimits) -> Self {
        Self {
            ledger,
            categories,
            limits,
        }
    }

    pub fn limits(&self) -> &BudgetLimits {
        &self.limits
    }

    /// One row per expense category, in category order.
    pub fn rows(&self) -> Vec<BudgetProgress> {
        let categories = self.categories.load();
        let totals = aggregate(&self.ledger.load(), &categories);
        let limits = self.limits.load();
        categories
            .iter()
            .map(|category| {
                BudgetProgress::new(
                    category.clone(),
                    totals.get(category).unwrap_or(0.0),
                    limits.get(category).copied(),
                )
            })
            .collect()
    }

    pub fn row(&self, category: &str) -> Option<BudgetProgress> {
        self.rows().into_iter().find(|row| row.category == category)
    }
}
