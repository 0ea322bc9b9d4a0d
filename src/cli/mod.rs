//! Line-oriented shell over a [`LedgerManager`](crate::core::LedgerManager).

pub mod commands;
mod completion;
pub mod core;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV_VAR};
