use std::{collections::BTreeMap, sync::Arc};

use crate::{
    core::input::validate_limit,
    errors::Result,
    ledger::normalize_category_name,
    storage::{read_or_default, write_json, KeyValueStore},
};

pub const LIMITS_KEY: &str = "expense.max_expenses";

/// Per-category spending ceilings. A missing entry means "no limit", never zero.
#[derive(Clone)]
pub struct BudgetLimits {
    backend: Arc<dyn KeyValueStore>,
}

impl BudgetLimits {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// All stored limits; entries that are not positive are dropped on read.
    pub fn load(&self) -> BTreeMap<String, f64> {
        let mut limits: BTreeMap<String, f64> = read_or_default(self.backend.as_ref(), LIMITS_KEY);
        limits.retain(|_, limit| limit.is_finite() && *limit > 0.0);
        limits
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.load().get(category).copied()
    }

    pub fn set(&self, category: &str, limit: f64) -> Result<()> {
        let category = normalize_category_name(category)?;
        let limit = validate_limit(limit)?;
        let mut limits = self.load();
        limits.insert(category.clone(), limit);
        write_json(self.backend.as_ref(), LIMITS_KEY, &limits)?;
        tracing::info!(%category, limit, "limit saved");
        Ok(())
    }

    /// Moves the limit of `old` to `new`. A limit already set on `new` is kept.
    pub fn rename(&self, old: &str, new: &str) -> Result<bool> {
        let mut limits = self.load();
        let Some(limit) = limits.remove(old) else {
            return Ok(false);
        };
        limits.entry(new.to_string()).or_insert(limit);
        write_json(self.backend.as_ref(), LIMITS_KEY, &limits)?;
        tracing::info!(old, new, "limit moved");
        Ok(true)
    }

    pub fn clear(&self, category: &str) -> Result<bool> {
        let mut limits = self.load();
        if limits.remove(category).is_none() {
            return Ok(false);
        }
        write_json(self.backend.as_ref(), LIMITS_KEY, &limits)?;
        tracing::info!(category, "limit cleared");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::LedgerError, storage::MemoryStore};

    fn limits() -> (BudgetLimits, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (BudgetLimits::new(backend.clone()), backend)
    }

    #[test]
    fn absent_limit_is_none() {
        let (limits, _) = limits();
        assert_eq!(limits.get("Food"), None);
    }

    #[test]
    fn set_persists_immediately() {
        let (limits, backend) = limits();
        limits.set("Food", 100.0).unwrap();
        assert_eq!(limits.get("Food"), Some(100.0));
        let raw = backend.get(LIMITS_KEY).unwrap().expect("persisted");
        assert!(raw.contains("Food"));
        let reopened = BudgetLimits::new(backend);
        assert_eq!(reopened.get("Food"), Some(100.0));
    }

    #[test]
    fn rejects_non_positive_limits() {
        let (limits, _) = limits();
        assert!(matches!(limits.set("Food", 0.0), Err(LedgerError::InvalidInput(_))));
        assert!(limits.set("Food", -1.0).is_err());
        assert!(limits.set("Food", f64::NAN).is_err());
        assert_eq!(limits.get("Food"), None);
    }

    #[test]
    fn clear_removes_entry() {
        let (limits, _) = limits();
        limits.set("Food", 50.0).unwrap();
        assert!(limits.clear("Food").unwrap());
        assert!(!limits.clear("Food").unwrap());
        assert_eq!(limits.get("Food"), None);
    }

    #[test]
    fn rename_moves_limit_unless_target_has_one() {
        let (limits, _) = limits();
        limits.set("Food", 80.0).unwrap();
        assert!(limits.rename("Food", "Groceries").unwrap());
        assert_eq!(limits.get("Food"), None);
        assert_eq!(limits.get("Groceries"), Some(80.0));

        limits.set("Snacks", 10.0).unwrap();
        assert!(limits.rename("Snacks", "Groceries").unwrap());
        assert_eq!(limits.get("Groceries"), Some(80.0));
        assert_eq!(limits.get("Snacks"), None);
        assert!(!limits.rename("Missing", "Other").unwrap());
    }

    #[test]
    fn stored_zero_reads_as_absent() {
        let (limits, backend) = limits();
        backend.put(LIMITS_KEY, r#"{"Food":0.0,"Rent":500.0}"#).unwrap();
        assert_eq!(limits.get("Food"), None);
        assert_eq!(limits.get("Rent"), Some(500.0));
    }
}
