use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use crate::{
    core::{
        aggregator::CategoryTotals,
        notifier::{ChangeNotifier, Subscription},
    },
    ledger::LedgerKind,
    storage::{read_or_default, KeyValueStore},
};

use super::{read, write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceState {
    Deficit,
    Even,
    Surplus,
}

/// Cached totals of both ledger kinds as shown on the overview screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummarySnapshot {
    pub expenses: CategoryTotals,
    pub incomes: CategoryTotals,
}

impl SummarySnapshot {
    pub fn load(backend: &dyn KeyValueStore) -> Self {
        Self {
            expenses: cached_totals(backend, LedgerKind::Expense),
            incomes: cached_totals(backend, LedgerKind::Income),
        }
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.grand_total()
    }

    pub fn total_incomes(&self) -> f64 {
        self.incomes.grand_total()
    }

    /// Income plus (non-positive) expenses.
    pub fn balance(&self) -> f64 {
        self.total_incomes() + self.total_expenses()
    }

    pub fn balance_state(&self) -> BalanceState {
        let balance = self.balance();
        if balance < 0.0 {
            BalanceState::Deficit
        } else if balance > 0.0 {
            BalanceState::Surplus
        } else {
            BalanceState::Even
        }
    }
}

fn cached_totals(backend: &dyn KeyValueStore, kind: LedgerKind) -> CategoryTotals {
    let map: BTreeMap<String, f64> = read_or_default(backend, kind.aggregate_key());
    CategoryTotals::from_map(map)
}

struct Shared {
    backend: Arc<dyn KeyValueStore>,
    snapshot: RwLock<SummarySnapshot>,
}

impl Shared {
    fn reload(&self) {
        *write(&self.snapshot) = SummarySnapshot::load(self.backend.as_ref());
        tracing::debug!("summary view reloaded");
    }
}

/// Overview of both ledgers, refreshed on any expense or income change.
pub struct SummaryView {
    shared: Arc<Shared>,
    notifier: ChangeNotifier,
    subscriptions: Vec<Subscription>,
}

impl SummaryView {
    pub fn new(backend: Arc<dyn KeyValueStore>, notifier: ChangeNotifier) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                snapshot: RwLock::new(SummarySnapshot::default()),
            }),
            notifier,
            subscriptions: Vec::new(),
        }
    }

    pub fn activate(&mut self) {
        if self.subscriptions.is_empty() {
            for kind in LedgerKind::ALL {
                let weak = Arc::downgrade(&self.shared);
                self.subscriptions.push(self.notifier.subscribe(kind, move |_| {
                    if let Some(shared) = weak.upgrade() {
                        shared.reload();
                    }
                }));
            }
        }
        self.shared.reload();
    }

    pub fn deactivate(&mut self) {
        self.subscriptions.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn reload(&self) {
        self.shared.reload();
    }

    pub fn snapshot(&self) -> SummarySnapshot {
        read(&self.shared.snapshot).clone()
    }
}
