use std::sync::Arc;

use crate::{
    config::{Config, ConfigManager},
    core::{
        notifier::ChangeNotifier,
        stores::{BudgetLimits, CategoryStore, LedgerStore, LoanStore},
        views::{BudgetPlanner, LedgerView, SummaryView},
    },
    errors::Result,
    ledger::{LedgerKind, LoanKind},
    storage::{JsonFileStore, KeyValueStore, MemoryStore},
};

/// Facade wiring every store to one backend and one change notifier.
pub struct LedgerManager {
    config: Config,
    backend: Arc<dyn KeyValueStore>,
    notifier: ChangeNotifier,
    expenses: LedgerStore,
    incomes: LedgerStore,
    expense_categories: CategoryStore,
    income_categories: CategoryStore,
    limits: BudgetLimits,
    borrowed: LoanStore,
    issued: LoanStore,
}

impl LedgerManager {
    /// Builds the stores and seeds default categories for kinds never saved before.
    pub fn open(backend: Arc<dyn KeyValueStore>, config: Config) -> Result<Self> {
        let notifier = ChangeNotifier::new();
        let expenses = LedgerStore::new(LedgerKind::Expense, backend.clone(), notifier.clone());
        let incomes = LedgerStore::new(LedgerKind::Income, backend.clone(), notifier.clone());
        let manager = Self {
            expense_categories: CategoryStore::new(backend.clone(), expenses.clone()),
            income_categories: CategoryStore::new(backend.clone(), incomes.clone()),
            limits: BudgetLimits::new(backend.clone()),
            borrowed: LoanStore::new(LoanKind::Borrowed, backend.clone()),
            issued: LoanStore::new(LoanKind::Issued, backend.clone()),
            expenses,
            incomes,
            notifier,
            backend,
            config,
        };
        for kind in LedgerKind::ALL {
            manager
                .categories(kind)
                .seed(manager.config.seed_categories(kind))?;
        }
        tracing::info!("ledger manager opened");
        Ok(manager)
    }

    /// Opens the durable store configured under the application data directory.
    pub fn open_default() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store = JsonFileStore::new(config_manager.store_dir(&config))?;
        Self::open(Arc::new(store), config)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        Self::open(Arc::new(MemoryStore::new()), config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.backend)
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn ledger(&self, kind: LedgerKind) -> &LedgerStore {
        match kind {
            LedgerKind::Expense => &self.expenses,
            LedgerKind::Income => &self.incomes,
        }
    }

    pub fn categories(&self, kind: LedgerKind) -> &CategoryStore {
        match kind {
            LedgerKind::Expense => &self.expense_categories,
            LedgerKind::Income => &self.income_categories,
        }
    }

    pub fn limits(&self) -> &BudgetLimits {
        &self.limits
    }

    pub fn loans(&self, kind: LoanKind) -> &LoanStore {
        match kind {
            LoanKind::Borrowed => &self.borrowed,
            LoanKind::Issued => &self.issued,
        }
    }

    /// Renames a category with its records; an expense category also keeps its limit.
    pub fn rename_category(&self, kind: LedgerKind, old: &str, new: &str) -> Result<bool> {
        if !self.categories(kind).rename(old, new)? {
            return Ok(false);
        }
        if kind == LedgerKind::Expense {
            self.limits.rename(old, new.trim())?;
        }
        Ok(true)
    }

    /// A new, inactive view of one ledger kind.
    pub fn ledger_view(&self, kind: LedgerKind) -> LedgerView {
        LedgerView::new(
            self.ledger(kind).clone(),
            self.categories(kind).clone(),
            self.notifier.clone(),
        )
    }

    pub fn summary_view(&self) -> SummaryView {
        SummaryView::new(self.backend(), self.notifier.clone())
    }

    pub fn budget_planner(&self) -> BudgetPlanner {
        BudgetPlanner::new(
            self.expenses.clone(),
            self.expense_categories.clone(),
            self.limits.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_seeds_income_defaults_once() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let manager = LedgerManager::open(backend.clone(), Config::default()).unwrap();
        assert_eq!(
            manager.categories(LedgerKind::Income).load(),
            ["Salary", "Bonuses", "Gifts"]
        );
        assert!(manager.categories(LedgerKind::Expense).load().is_empty());
        assert!(manager
            .categories(LedgerKind::Expense)
            .is_initialized()
            .unwrap());

        manager.categories(LedgerKind::Income).delete("Gifts").unwrap();
        let reopened = LedgerManager::open(backend, Config::default()).unwrap();
        assert_eq!(
            reopened.categories(LedgerKind::Income).load(),
            ["Salary", "Bonuses"]
        );
    }

    #[test]
    fn expense_rename_carries_the_limit() {
        let manager = LedgerManager::in_memory(Config::default()).unwrap();
        manager.categories(LedgerKind::Expense).add("Food").unwrap();
        manager.limits().set("Food", 100.0).unwrap();

        assert!(manager
            .rename_category(LedgerKind::Expense, "Food", " Groceries ")
            .unwrap());
        assert_eq!(manager.limits().get("Groceries"), Some(100.0));
        assert_eq!(manager.limits().get("Food"), None);
        let row = manager.budget_planner().row("Groceries").expect("row");
        assert_eq!(row.limit, Some(100.0));

        assert!(!manager
            .rename_category(LedgerKind::Expense, "Food", "Other")
            .unwrap());
    }

    #[test]
    fn stores_are_routed_by_kind() {
        let manager = LedgerManager::in_memory(Config::default()).unwrap();
        assert_eq!(manager.ledger(LedgerKind::Income).kind(), LedgerKind::Income);
        assert_eq!(manager.loans(LoanKind::Issued).kind(), LoanKind::Issued);
        assert_eq!(manager.ledger_view(LedgerKind::Expense).kind(), LedgerKind::Expense);
    }
}
