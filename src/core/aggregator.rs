//! Pure reductions from a record snapshot to per-category and grand totals.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::ledger::LedgerRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Output of [`aggregate`]: one entry per category plus the grand total.
///
/// Entries follow the category list order. Categories without records map to `0.0`.
/// Records whose category is not listed get their own trailing entries so that the
/// entries always add up to the grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
    grand_total: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.category.clone(), entry.total))
            .collect()
    }

    /// Rebuilds totals from a cached map; the grand total is the sum of its values.
    pub fn from_map(map: BTreeMap<String, f64>) -> Self {
        let grand_total = map.values().sum();
        let entries = map
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect();
        Self {
            entries,
            grand_total,
        }
    }

    /// Share of the grand total held by each category, in percent.
    pub fn shares(&self) -> Vec<(String, f64)> {
        self.entries
            .iter()
            .map(|entry| {
                let share = if self.grand_total == 0.0 {
                    0.0
                } else {
                    100.0 * entry.total / self.grand_total
                };
                (entry.category.clone(), share)
            })
            .collect()
    }
}

pub fn aggregate(records: &[LedgerRecord], categories: &[String]) -> CategoryTotals {
    let mut entries: Vec<CategoryTotal> = Vec::with_capacity(categories.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for category in categories {
        if index.contains_key(category.as_str()) {
            continue;
        }
        index.insert(category.as_str(), entries.len());
        entries.push(CategoryTotal {
            category: category.clone(),
            total: 0.0,
        });
    }

    for record in records {
        let slot = match index.get(record.category.as_str()) {
            Some(slot) => *slot,
            None => {
                index.insert(record.category.as_str(), entries.len());
                entries.push(CategoryTotal {
                    category: record.category.clone(),
                    total: 0.0,
                });
                entries.len() - 1
            }
        };
        entries[slot].total += record.amount;
    }

    CategoryTotals {
        entries,
        grand_total: grand_total(records),
    }
}

pub fn grand_total(records: &[LedgerRecord]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}
