use std::sync::Arc;

use crate::{
    errors::Result,
    ledger::{normalize_category_name, LedgerKind, LedgerRecord},
    storage::{read_or_default, write_json, KeyValueStore},
};

use super::ledger_store::{without_category, LedgerStore};

/// Ordered category names of one ledger kind.
///
/// Renames and deletions cascade into the records of the paired [`LedgerStore`];
/// the records are written first and restored if the category list cannot be saved.
#[derive(Clone)]
pub struct CategoryStore {
    backend: Arc<dyn KeyValueStore>,
    ledger: LedgerStore,
}

impl CategoryStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, ledger: LedgerStore) -> Self {
        Self { backend, ledger }
    }

    pub fn kind(&self) -> LedgerKind {
        self.ledger.kind()
    }

    pub fn load(&self) -> Vec<String> {
        read_or_default(self.backend.as_ref(), self.key())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.load().iter().any(|existing| existing == name)
    }

    /// Whether a category list has ever been written for this kind.
    pub fn is_initialized(&self) -> Result<bool> {
        self.backend.contains(self.key())
    }

    /// Writes `names` when no list exists yet. Returns `true` if it seeded.
    ///
    /// A list that exists but cannot be read counts as initialized and loads empty.
    pub fn seed(&self, names: &[String]) -> Result<bool> {
        match self.is_initialized() {
            Ok(false) => {}
            Ok(true) => return Ok(false),
            Err(err) => {
                tracing::warn!(kind = %self.kind(), error = %err, "category list unreadable, not seeding");
                return Ok(false);
            }
        }
        let mut seeded: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = normalize_category_name(name)?;
            if !seeded.contains(&name) {
                seeded.push(name);
            }
        }
        self.save(&seeded)?;
        self.ledger.refresh_aggregate()?;
        tracing::info!(kind = %self.kind(), count = seeded.len(), "categories seeded");
        Ok(true)
    }

    /// Appends a category. Blank names are rejected; an existing name is left as is.
    pub fn add(&self, name: &str) -> Result<bool> {
        let name = normalize_category_name(name)?;
        let mut categories = self.load();
        if categories.contains(&name) {
            tracing::debug!(kind = %self.kind(), %name, "category already present");
            return Ok(false);
        }
        categories.push(name.clone());
        self.save(&categories)?;
        self.ledger.refresh_aggregate()?;
        tracing::info!(kind = %self.kind(), %name, "category added");
        self.ledger.publish();
        Ok(true)
    }

    /// Renames `old` in place and moves its records to the new name.
    ///
    /// Renaming onto an existing name merges the two categories.
    pub fn rename(&self, old: &str, new: &str) -> Result<bool> {
        let new = normalize_category_name(new)?;
        let categories = self.load();
        if !categories.iter().any(|name| name == old) {
            tracing::debug!(kind = %self.kind(), old, "rename ignored, category missing");
            return Ok(false);
        }
        if old == new {
            return Ok(false);
        }

        let mut renamed: Vec<String> = Vec::with_capacity(categories.len());
        for name in categories {
            let name = if name == old { new.clone() } else { name };
            if !renamed.contains(&name) {
                renamed.push(name);
            }
        }

        let before = self.ledger.load();
        let moved: Vec<LedgerRecord> = before
            .iter()
            .cloned()
            .map(|mut record| {
                if record.category == old {
                    record.category = new.clone();
                }
                record
            })
            .collect();

        self.commit_with_records(&before, &moved, &renamed)?;
        tracing::info!(kind = %self.kind(), old, new = %new, "category renamed");
        Ok(true)
    }

    /// Removes a category together with all of its records.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut categories = self.load();
        let count = categories.len();
        categories.retain(|existing| existing != name);
        if categories.len() == count {
            tracing::debug!(kind = %self.kind(), name, "delete ignored, category missing");
            return Ok(false);
        }

        let before = self.ledger.load();
        let (kept, removed) = without_category(before.clone(), name);

        self.commit_with_records(&before, &kept, &categories)?;
        tracing::info!(kind = %self.kind(), name, removed, "category deleted");
        Ok(true)
    }

    fn commit_with_records(
        &self,
        before: &[LedgerRecord],
        records: &[LedgerRecord],
        categories: &[String],
    ) -> Result<()> {
        self.ledger.write_records(records)?;
        if let Err(err) = self.save(categories) {
            tracing::warn!(kind = %self.kind(), error = %err, "category save failed, restoring records");
            if let Err(restore) = self.ledger.write_records(before) {
                tracing::warn!(kind = %self.kind(), error = %restore, "record restore failed");
            }
            return Err(err);
        }
        self.ledger.refresh_aggregate()?;
        self.ledger.publish();
        Ok(())
    }

    fn save(&self, categories: &[String]) -> Result<()> {
        write_json(self.backend.as_ref(), self.key(), categories)
    }

    fn key(&self) -> &'static str {
        self.kind().categories_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::notifier::ChangeNotifier,
        errors::LedgerError,
        storage::MemoryStore,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stores(kind: LedgerKind) -> (CategoryStore, LedgerStore, ChangeNotifier) {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let notifier = ChangeNotifier::new();
        let ledger = LedgerStore::new(kind, backend.clone(), notifier.clone());
        (CategoryStore::new(backend, ledger.clone()), ledger, notifier)
    }

    #[test]
    fn add_trims_and_keeps_insertion_order() {
        let (categories, _, _) = stores(LedgerKind::Expense);
        assert!(categories.add(" Rent ").unwrap());
        assert!(categories.add("Food").unwrap());
        assert!(!categories.add("Food").unwrap());
        assert_eq!(categories.load(), ["Rent", "Food"]);
    }

    #[test]
    fn add_rejects_blank_names() {
        let (categories, _, _) = stores(LedgerKind::Expense);
        assert!(matches!(
            categories.add("  "),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(categories.load().is_empty());
        assert!(!categories.is_initialized().unwrap());
    }

    #[test]
    fn rename_cascades_to_records() {
        let (categories, ledger, _) = stores(LedgerKind::Expense);
        categories.add("Rent").unwrap();
        categories.add("Food").unwrap();
        ledger.add(LedgerRecord::new("Food", -5.0, "2024-01-01")).unwrap();
        ledger.add(LedgerRecord::new("Rent", -9.0, "2024-01-01")).unwrap();

        assert!(categories.rename("Food", "Groceries").unwrap());
        assert_eq!(categories.load(), ["Rent", "Groceries"]);
        let totals = ledger.totals();
        assert_eq!(totals.get("Groceries"), Some(-5.0));
        assert!(!totals.contains("Food"));
        assert!(!categories.rename("Missing", "Other").unwrap());
    }

    #[test]
    fn rename_onto_existing_name_merges() {
        let (categories, ledger, _) = stores(LedgerKind::Income);
        categories.add("Salary").unwrap();
        categories.add("Wages").unwrap();
        ledger.add(LedgerRecord::new("Wages", 10.0, "2024-01-01")).unwrap();
        ledger.add(LedgerRecord::new("Salary", 20.0, "2024-01-01")).unwrap();
        assert!(categories.rename("Wages", "Salary").unwrap());
        assert_eq!(categories.load(), ["Salary"]);
        assert_eq!(ledger.totals().get("Salary"), Some(30.0));
    }

    #[test]
    fn delete_removes_category_and_records_with_one_notification() {
        let (categories, ledger, notifier) = stores(LedgerKind::Expense);
        categories.add("Rent").unwrap();
        categories.add("Food").unwrap();
        ledger.add(LedgerRecord::new("Food", -50.0, "2024-01-01")).unwrap();
        ledger.add(LedgerRecord::new("Rent", -200.0, "2024-01-01")).unwrap();
        ledger.add(LedgerRecord::new("Food", -30.0, "2024-01-01")).unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let _subscription = notifier.subscribe(LedgerKind::Expense, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(categories.delete("Food").unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(categories.load(), ["Rent"]);
        assert!(ledger.load().iter().all(|record| record.category != "Food"));
        let totals = ledger.totals();
        assert!(!totals.contains("Food"));
        assert_eq!(totals.grand_total(), -200.0);

        assert!(!categories.delete("Food").unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(LedgerError::Storage(format!("cannot read `{key}`")))
        }

        fn put(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn seed_skips_unreadable_lists() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(UnreadableStore);
        let ledger = LedgerStore::new(LedgerKind::Income, backend.clone(), ChangeNotifier::new());
        let categories = CategoryStore::new(backend, ledger);
        assert!(!categories.seed(&["Salary".to_string()]).unwrap());
        assert!(categories.load().is_empty());
    }

    #[test]
    fn seed_only_writes_missing_lists() {
        let (categories, _, _) = stores(LedgerKind::Income);
        let defaults = vec!["Salary".to_string(), "Gifts".to_string()];
        assert!(categories.seed(&defaults).unwrap());
        categories.delete("Gifts").unwrap();
        categories.delete("Salary").unwrap();
        assert!(!categories.seed(&defaults).unwrap());
        assert!(categories.load().is_empty());
    }
}
