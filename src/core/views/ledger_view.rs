use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use crate::{
    core::{
        aggregator::{aggregate, CategoryTotals},
        notifier::{ChangeNotifier, Subscription},
        stores::{CategoryStore, LedgerStore},
    },
    ledger::{LedgerKind, LedgerRecord},
};

use super::{read, write};

/// What a ledger screen shows: categories, records and their totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub categories: Vec<String>,
    pub records: Vec<LedgerRecord>,
    pub totals: CategoryTotals,
}

impl LedgerSnapshot {
    pub fn load(ledger: &LedgerStore, categories: &CategoryStore) -> Self {
        let categories = categories.load();
        let records = ledger.load();
        let totals = aggregate(&records, &categories);
        Self {
            categories,
            records,
            totals,
        }
    }
}

struct Shared {
    ledger: LedgerStore,
    categories: CategoryStore,
    snapshot: RwLock<LedgerSnapshot>,
    reloads: AtomicU64,
}

impl Shared {
    fn reload(&self) {
        let fresh = LedgerSnapshot::load(&self.ledger, &self.categories);
        *write(&self.snapshot) = fresh;
        self.reloads.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(kind = %self.ledger.kind(), "ledger view reloaded");
    }
}

/// Controller-owned state for one ledger kind.
pub struct LedgerView {
    shared: Arc<Shared>,
    notifier: ChangeNotifier,
    subscription: Option<Subscription>,
}

impl LedgerView {
    pub fn new(ledger: LedgerStore, categories: CategoryStore, notifier: ChangeNotifier) -> Self {
        Self {
            shared: Arc::new(Shared {
                ledger,
                categories,
                snapshot: RwLock::new(LedgerSnapshot::default()),
                reloads: AtomicU64::new(0),
            }),
            notifier,
            subscription: None,
        }
    }

    pub fn kind(&self) -> LedgerKind {
        self.shared.ledger.kind()
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.shared.ledger
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.shared.categories
    }

    /// Subscribes to changes of this kind and reloads, recovering anything missed
    /// while inactive.
    pub fn activate(&mut self) {
        if self.subscription.is_none() {
            let weak = Arc::downgrade(&self.shared);
            self.subscription = Some(self.notifier.subscribe(self.kind(), move |_| {
                if let Some(shared) = weak.upgrade() {
                    shared.reload();
                }
            }));
        }
        self.shared.reload();
    }

    pub fn deactivate(&mut self) {
        self.subscription = None;
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn reload(&self) {
        self.shared.reload();
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        read(&self.shared.snapshot).clone()
    }

    pub fn totals(&self) -> CategoryTotals {
        read(&self.shared.snapshot).totals.clone()
    }

    /// Number of reloads so far; lets callers detect that a refresh happened.
    pub fn reload_count(&self) -> u64 {
        self.shared.reloads.load(Ordering::SeqCst)
    }
}
