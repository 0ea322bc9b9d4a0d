use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::core::input;
use crate::errors::LedgerError;
use crate::ledger::LedgerKind;

use super::required;

const LIMIT_USAGE: &str = "limit <set|clear> <category> [amount]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "limit",
            "Set or clear a spending ceiling for an expense category",
            LIMIT_USAGE,
            cmd_limit,
        )
        .args(&[ArgKind::Action(&["set", "clear"]), ArgKind::Category]),
        CommandEntry::new(
            "budget",
            "Show spending against each expense category's ceiling",
            "budget",
            cmd_budget,
        ),
    ]
}

fn cmd_limit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = required(args, 0, LIMIT_USAGE)?.to_lowercase();
    let category = required(args, 1, LIMIT_USAGE)?;
    if !context.manager.categories(LedgerKind::Expense).contains(category) {
        return Err(LedgerError::CategoryNotFound(category.to_string()).into());
    }

    match action.as_str() {
        "set" => {
            let limit = input::parse_limit(required(args, 2, LIMIT_USAGE)?)?;
            context.manager.limits().set(category, limit)?;
            io::print_success(format!(
                "Limit for `{}` set to {}.",
                category,
                output::format_amount(limit)
            ));
            Ok(())
        }
        "clear" => {
            if context.manager.limits().clear(category)? {
                io::print_success(format!("Limit for `{}` cleared.", category));
            } else {
                io::print_warning(format!("`{}` has no limit.", category));
            }
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown limit action `{other}`; usage: {LIMIT_USAGE}"
        ))),
    }
}

fn cmd_budget(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.manager.budget_planner().rows();
    output::section("Budget");
    if rows.is_empty() {
        io::print_info("No expense categories yet.");
    }
    for row in rows {
        let limit = row
            .limit
            .map(output::format_amount)
            .unwrap_or_else(|| "-".into());
        let percentage = row
            .percentage
            .map(|value| format!("{:.0}%", value))
            .unwrap_or_else(|| "-".into());
        let text = format!(
            "  {:<20} {:>14} / {:>14} {:>6}",
            row.category,
            output::format_amount(row.spent),
            limit,
            percentage
        );
        if row.is_over_limit() {
            io::print_warning(text);
        } else {
            output::line(text);
        }
    }
    Ok(())
}
