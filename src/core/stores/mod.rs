//! Persistent stores, one per owned storage key family.

pub mod category_store;
pub mod ledger_store;
pub mod limits_store;
pub mod loan_store;

pub use category_store::CategoryStore;
pub use ledger_store::LedgerStore;
pub use limits_store::{BudgetLimits, LIMITS_KEY};
pub use loan_store::LoanStore;
