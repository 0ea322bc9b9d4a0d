//! Ledger domain models, persistence-friendly types, and helpers.

pub mod budget;
pub mod category;
pub mod date;
pub mod kind;
pub mod loan;
pub mod transaction;

pub use budget::{progress_percentage, BudgetProgress};
pub use category::normalize_category_name;
pub use kind::LedgerKind;
pub use loan::{LoanKind, LoanRecord};
pub use transaction::LedgerRecord;
