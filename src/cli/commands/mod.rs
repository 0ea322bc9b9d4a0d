pub mod budget;
pub mod category;
pub mod loan;
pub mod summary;
pub mod system;
pub mod transaction;

use std::str::FromStr;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::LedgerError;

const ROOT_COMMAND_ORDER: &[&str] = &[
    "add", "edit", "remove", "list", "history", "category", "limit", "budget", "loan", "summary",
    "help", "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(transaction::definitions());
    commands.extend(category::definitions());
    commands.extend(budget::definitions());
    commands.extend(loan::definitions());
    commands.extend(summary::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_all(&mut registry);
    registry
}

/// Returns the argument at `index` or a usage error.
pub(crate) fn required<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn parse_arg<T>(raw: &str) -> Result<T, CommandError>
where
    T: FromStr<Err = LedgerError>,
{
    raw.parse::<T>().map_err(CommandError::from)
}

/// Joins trailing arguments into one free-text value.
pub(crate) fn rest(args: &[&str], from: usize) -> Option<String> {
    if args.len() > from {
        Some(args[from..].join(" "))
    } else {
        None
    }
}
