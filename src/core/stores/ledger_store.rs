use std::sync::Arc;

use uuid::Uuid;

use crate::{
    core::{
        aggregator::{aggregate, CategoryTotals},
        notifier::ChangeNotifier,
    },
    errors::{LedgerError, Result},
    ledger::{LedgerKind, LedgerRecord},
    storage::{read_or_default, write_json, KeyValueStore},
};

/// Every record of one ledger kind, persisted as a single JSON array.
///
/// Each mutation reads the current snapshot, writes the whole updated list back,
/// refreshes the cached aggregate and publishes one change notification.
#[derive(Clone)]
pub struct LedgerStore {
    kind: LedgerKind,
    backend: Arc<dyn KeyValueStore>,
    notifier: ChangeNotifier,
}

impl LedgerStore {
    pub fn new(kind: LedgerKind, backend: Arc<dyn KeyValueStore>, notifier: ChangeNotifier) -> Self {
        Self {
            kind,
            backend,
            notifier,
        }
    }

    pub fn kind(&self) -> LedgerKind {
        self.kind
    }

    /// Current snapshot; empty when nothing was stored or the payload is malformed.
    pub fn load(&self) -> Vec<LedgerRecord> {
        let records: Vec<LedgerRecord> =
            read_or_default(self.backend.as_ref(), self.kind.transactions_key());
        records
            .into_iter()
            .map(|record| LedgerRecord {
                amount: self.kind.normalize_amount(record.amount),
                ..record
            })
            .collect()
    }

    pub fn find(&self, id: Uuid) -> Option<LedgerRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    /// Appends a record and returns it as stored.
    pub fn add(&self, record: LedgerRecord) -> Result<LedgerRecord> {
        let record = self.validated(record)?;
        let mut records = self.load();
        records.push(record.clone());
        self.commit(&records)?;
        tracing::info!(
            kind = %self.kind,
            id = %record.id,
            category = %record.category,
            amount = record.amount,
            "record added"
        );
        self.publish();
        Ok(record)
    }

    /// Replaces the record with the same id. Returns `false` without touching storage
    /// when no such record exists.
    pub fn update(&self, record: LedgerRecord) -> Result<bool> {
        let record = self.validated(record)?;
        let mut records = self.load();
        let Some(slot) = records.iter_mut().find(|existing| existing.id == record.id) else {
            tracing::debug!(kind = %self.kind, id = %record.id, "update ignored, record missing");
            return Ok(false);
        };
        *slot = record;
        self.commit(&records)?;
        tracing::info!(kind = %self.kind, "record updated");
        self.publish();
        Ok(true)
    }

    pub fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            tracing::debug!(kind = %self.kind, %id, "delete ignored, record missing");
            return Ok(false);
        }
        self.commit(&records)?;
        tracing::info!(kind = %self.kind, %id, "record deleted");
        self.publish();
        Ok(true)
    }

    /// Removes every record filed under `category`; returns how many were removed.
    pub fn delete_by_category(&self, category: &str) -> Result<usize> {
        let records = self.load();
        let (kept, removed) = without_category(records, category);
        if removed == 0 {
            return Ok(0);
        }
        self.commit(&kept)?;
        tracing::info!(kind = %self.kind, category, removed, "records deleted by category");
        self.publish();
        Ok(removed)
    }

    /// Aggregates the current snapshot against the stored category list.
    pub fn totals(&self) -> CategoryTotals {
        aggregate(&self.load(), &self.category_names())
    }

    /// Recomputes totals and writes them to the aggregate cache.
    pub fn refresh_aggregate(&self) -> Result<CategoryTotals> {
        let totals = self.totals();
        write_json(
            self.backend.as_ref(),
            self.kind.aggregate_key(),
            &totals.to_map(),
        )?;
        tracing::debug!(kind = %self.kind, total = totals.grand_total(), "aggregate refreshed");
        Ok(totals)
    }

    pub(crate) fn write_records(&self, records: &[LedgerRecord]) -> Result<()> {
        write_json(self.backend.as_ref(), self.kind.transactions_key(), records)
    }

    pub(crate) fn publish(&self) {
        self.notifier.publish(self.kind);
    }

    /// Non-finite amounts encode as `null` and would make the whole list unreadable.
    fn validated(&self, record: LedgerRecord) -> Result<LedgerRecord> {
        if !record.amount.is_finite() {
            tracing::warn!(kind = %self.kind, amount = record.amount, "rejected non-finite amount");
            return Err(LedgerError::InvalidInput(format!(
                "amount must be a finite number, got {}",
                record.amount
            )));
        }
        Ok(record.normalized(self.kind))
    }

    fn commit(&self, records: &[LedgerRecord]) -> Result<()> {
        self.write_records(records)?;
        self.refresh_aggregate()?;
        Ok(())
    }

    fn category_names(&self) -> Vec<String> {
        read_or_default(self.backend.as_ref(), self.kind.categories_key())
    }
}

pub(crate) fn without_category(
    records: Vec<LedgerRecord>,
    category: &str,
) -> (Vec<LedgerRecord>, usize) {
    let before = records.len();
    let kept: Vec<LedgerRecord> = records
        .into_iter()
        .filter(|record| record.category != category)
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store(kind: LedgerKind) -> (LedgerStore, Arc<MemoryStore>, ChangeNotifier) {
        let backend = Arc::new(MemoryStore::new());
        let notifier = ChangeNotifier::new();
        let store = LedgerStore::new(kind, backend.clone(), notifier.clone());
        (store, backend, notifier)
    }

    #[test]
    fn add_forces_expense_sign_and_storage_date() {
        let (store, _, _) = store(LedgerKind::Expense);
        let stored = store
            .add(LedgerRecord::new("Food", 50.0, "03/04/2024"))
            .unwrap();
        assert_eq!(stored.amount, -50.0);
        assert_eq!(stored.date, "2024-04-03");

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], stored);
    }

    #[test]
    fn income_is_stored_unchanged() {
        let (store, _, _) = store(LedgerKind::Income);
        let original = LedgerRecord::new("Salary", 1000.0, "2024-04-01");
        store.add(original.clone()).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].same_entry(&original));
        assert_eq!(loaded[0].amount, 1000.0);
    }

    #[test]
    fn load_normalizes_legacy_positive_expenses() {
        let (store, backend, _) = store(LedgerKind::Expense);
        let legacy = vec![LedgerRecord::new("Food", 25.0, "2024-01-01")];
        write_json(backend.as_ref(), "expense.transactions", &legacy).unwrap();
        assert_eq!(store.load()[0].amount, -25.0);
    }

    #[test]
    fn non_finite_amounts_leave_existing_records_intact() {
        let (store, backend, _) = store(LedgerKind::Expense);
        store.add(LedgerRecord::new("Rent", -200.0, "2024-01-01")).unwrap();
        let food = store.add(LedgerRecord::new("Food", -50.0, "2024-01-02")).unwrap();
        let before = backend.get("expense.transactions").unwrap();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                store.add(LedgerRecord::new("Food", bad, "2024-01-03")),
                Err(LedgerError::InvalidInput(_))
            ));
            let mut changed = food.clone();
            changed.amount = bad;
            assert!(store.update(changed).is_err());
        }

        assert_eq!(backend.get("expense.transactions").unwrap(), before);
        store.add(LedgerRecord::new("Food", -5.0, "2024-01-04")).unwrap();
        assert_eq!(store.load().len(), 3);
        assert_eq!(store.totals().grand_total(), -255.0);
    }

    #[test]
    fn malformed_snapshot_loads_empty() {
        let (store, backend, _) = store(LedgerKind::Expense);
        backend.put("expense.transactions", "[{\"id\":42}]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn update_is_idempotent_and_ignores_unknown_ids() {
        let (store, backend, _) = store(LedgerKind::Expense);
        let mut record = store
            .add(LedgerRecord::new("Food", -10.0, "2024-01-01"))
            .unwrap();
        record.amount = -15.0;
        assert!(store.update(record.clone()).unwrap());
        let once = backend.get("expense.transactions").unwrap();
        assert!(store.update(record.clone()).unwrap());
        let twice = backend.get("expense.transactions").unwrap();
        assert_eq!(once, twice);

        let stranger = LedgerRecord::new("Food", -1.0, "2024-01-01");
        assert!(!store.update(stranger).unwrap());
        assert_eq!(backend.get("expense.transactions").unwrap(), twice);
    }

    #[test]
    fn delete_by_id_removes_single_record() {
        let (store, _, _) = store(LedgerKind::Income);
        let keep = store.add(LedgerRecord::new("Gifts", 5.0, "2024-01-01")).unwrap();
        let gone = store.add(LedgerRecord::new("Gifts", 7.0, "2024-01-02")).unwrap();
        assert!(store.delete_by_id(gone.id).unwrap());
        assert!(!store.delete_by_id(gone.id).unwrap());
        assert_eq!(store.load(), vec![keep]);
    }

    #[test]
    fn delete_by_category_cascades_to_totals() {
        let (store, backend, _) = store(LedgerKind::Expense);
        write_json(
            backend.as_ref(),
            "expense.categories",
            &vec!["Rent".to_string(), "Food".to_string()],
        )
        .unwrap();
        store.add(LedgerRecord::new("Food", -50.0, "2024-01-01")).unwrap();
        store.add(LedgerRecord::new("Rent", -200.0, "2024-01-01")).unwrap();
        store.add(LedgerRecord::new("Food", -30.0, "2024-01-02")).unwrap();

        assert_eq!(store.delete_by_category("Food").unwrap(), 2);
        assert!(store.load().iter().all(|record| record.category != "Food"));
        assert_eq!(store.totals().get("Rent"), Some(-200.0));
        assert_eq!(store.delete_by_category("Food").unwrap(), 0);
    }

    #[test]
    fn each_mutation_publishes_once_and_refreshes_cache() {
        let (store, backend, notifier) = store(LedgerKind::Expense);
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let _subscription = notifier.subscribe(LedgerKind::Expense, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let record = store.add(LedgerRecord::new("Food", -4.0, "2024-01-01")).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        let cached = backend.get("aggregate.expenses").unwrap().expect("aggregate cached");
        assert!(cached.contains("Food"));

        store.delete_by_id(record.id).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        store.delete_by_id(record.id).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2, "no-op must not publish");
    }
}
