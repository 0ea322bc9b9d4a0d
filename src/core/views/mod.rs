//! State holders for presentation surfaces.
//!
//! A view owns a snapshot, reloads it when it becomes active and again whenever the
//! notifier reports a change while it is active. Nothing is patched incrementally.

pub mod budget_planner;
pub mod ledger_view;
pub mod summary_view;

pub use budget_planner::BudgetPlanner;
pub use ledger_view::{LedgerSnapshot, LedgerView};
pub use summary_view::{BalanceState, SummarySnapshot, SummaryView};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn read<T>(cell: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    cell.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(cell: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    cell.write().unwrap_or_else(PoisonError::into_inner)
}
