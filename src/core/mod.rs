pub mod aggregator;
pub mod history;
pub mod input;
pub mod ledger_manager;
pub mod notifier;
pub mod stores;
pub mod views;

pub use aggregator::{aggregate, grand_total, CategoryTotal, CategoryTotals};
pub use ledger_manager::LedgerManager;
pub use notifier::{ChangeNotifier, Subscription};
