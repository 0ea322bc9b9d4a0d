#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use home_ledger::{config::Config, storage::JsonFileStore, LedgerManager};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a manager over a durable JSON store rooted at `base`.
pub fn open_manager(base: &PathBuf) -> LedgerManager {
    let store = JsonFileStore::new(base.join("store")).expect("create json store");
    LedgerManager::open(Arc::new(store), Config::default()).expect("open manager")
}

pub fn setup_test_env() -> (LedgerManager, PathBuf) {
    let base = temp_base();
    (open_manager(&base), base)
}
