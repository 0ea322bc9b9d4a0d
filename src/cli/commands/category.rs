use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::ledger::LedgerKind;

use super::{parse_arg, required};

const USAGE: &str = "category <list|add|rename|delete> <expense|income> [name] [new-name]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "List, add, rename or delete categories",
        USAGE,
        cmd_category,
    )
    .args(&[
        ArgKind::Action(&["list", "add", "rename", "delete"]),
        ArgKind::LedgerKind,
        ArgKind::Category,
    ])]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = required(args, 0, USAGE)?.to_lowercase();
    let kind: LedgerKind = parse_arg(required(args, 1, USAGE)?)?;

    match action.as_str() {
        "list" => list(context, kind),
        "add" => {
            let name = required(args, 2, USAGE)?;
            if context.manager.categories(kind).add(name)? {
                io::print_success(format!("Category `{}` added to {}.", name.trim(), kind));
            } else {
                io::print_warning(format!("Category `{}` already exists.", name.trim()));
            }
            Ok(())
        }
        "rename" => {
            let old = required(args, 2, USAGE)?;
            let new = required(args, 3, USAGE)?;
            if context.manager.rename_category(kind, old, new)? {
                io::print_success(format!("Category `{}` renamed to `{}`.", old, new.trim()));
            } else {
                io::print_warning(format!("Nothing to rename for `{}`.", old));
            }
            Ok(())
        }
        "delete" => {
            let name = required(args, 2, USAGE)?;
            if !context.manager.categories(kind).contains(name) {
                io::print_warning(format!("Category `{}` does not exist.", name));
                return Ok(());
            }
            let prompt = format!("Delete `{}` and all of its records?", name);
            if !context.confirm(&prompt)? {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
            context.manager.categories(kind).delete(name)?;
            io::print_success(format!("Category `{}` deleted.", name));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn list(context: &ShellContext, kind: LedgerKind) -> CommandResult {
    let categories = context.view(kind).snapshot().categories;
    output::section(format!("{} categories", kind));
    if categories.is_empty() {
        io::print_info("No categories yet. Use `category add` to create one.");
    }
    for name in categories {
        output::line(format!("  {}", name));
    }
    Ok(())
}
