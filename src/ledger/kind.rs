use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::LedgerError;

/// Which side of the household books a record belongs to.
///
/// Each kind owns its own category list, record list and change channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Expense,
    Income,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 2] = [LedgerKind::Expense, LedgerKind::Income];

    pub fn namespace(self) -> &'static str {
        match self {
            LedgerKind::Expense => "expense",
            LedgerKind::Income => "income",
        }
    }

    pub fn categories_key(self) -> &'static str {
        match self {
            LedgerKind::Expense => "expense.categories",
            LedgerKind::Income => "income.categories",
        }
    }

    pub fn transactions_key(self) -> &'static str {
        match self {
            LedgerKind::Expense => "expense.transactions",
            LedgerKind::Income => "income.transactions",
        }
    }

    /// Cached per-category totals read by the summary surface.
    pub fn aggregate_key(self) -> &'static str {
        match self {
            LedgerKind::Expense => "aggregate.expenses",
            LedgerKind::Income => "aggregate.incomes",
        }
    }

    /// Applies the sign convention: expenses are never positive, incomes are kept as entered.
    pub fn normalize_amount(self, amount: f64) -> f64 {
        match self {
            LedgerKind::Expense => -amount.abs(),
            LedgerKind::Income => amount,
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

impl FromStr for LedgerKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(LedgerKind::Expense),
            "income" | "incomes" => Ok(LedgerKind::Income),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown ledger type `{other}` (expected expense or income)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_amounts_are_forced_non_positive() {
        assert_eq!(LedgerKind::Expense.normalize_amount(50.0), -50.0);
        assert_eq!(LedgerKind::Expense.normalize_amount(-50.0), -50.0);
        assert_eq!(LedgerKind::Expense.normalize_amount(0.0), 0.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        for kind in LedgerKind::ALL {
            for amount in [-12.5, 0.0, 99.99] {
                let once = kind.normalize_amount(amount);
                assert_eq!(kind.normalize_amount(once), once);
            }
        }
    }

    #[test]
    fn income_amounts_are_kept() {
        assert_eq!(LedgerKind::Income.normalize_amount(1000.0), 1000.0);
        assert_eq!(LedgerKind::Income.normalize_amount(-3.0), -3.0);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Expense".parse::<LedgerKind>().unwrap(), LedgerKind::Expense);
        assert_eq!(" incomes ".parse::<LedgerKind>().unwrap(), LedgerKind::Income);
        assert!("loan".parse::<LedgerKind>().is_err());
    }
}
