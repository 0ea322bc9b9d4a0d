#![doc(test(attr(deny(warnings))))]

//! Home Ledger keeps a single household's expense and income books: categories,
//! records, per-category totals, spending limits and loans, persisted to a
//! string-keyed JSON store and kept in sync across views through change
//! notifications.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::LedgerManager;
pub use errors::{LedgerError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Home Ledger tracing initialized.");
    });
}
