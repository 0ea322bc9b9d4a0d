use crate::cli::core::{short_id, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::core::{history, input};
use crate::errors::LedgerError;
use crate::ledger::{date, LedgerKind, LedgerRecord};

use super::{parse_arg, required, rest};

const ADD_USAGE: &str = "add <expense|income> <category> <amount> [date] [comment]";
const EDIT_USAGE: &str = "edit <expense|income> <id> <amount> [date] [comment]";
const REMOVE_USAGE: &str = "remove <expense|income> <id>";
const LIST_USAGE: &str = "list <expense|income> [category]";
const HISTORY_USAGE: &str = "history <expense|income>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an expense or income", ADD_USAGE, cmd_add)
            .args(&[ArgKind::LedgerKind, ArgKind::Category]),
        CommandEntry::new(
            "edit",
            "Change the amount, date or comment of a record",
            EDIT_USAGE,
            cmd_edit,
        )
        .args(&[ArgKind::LedgerKind, ArgKind::RecordId]),
        CommandEntry::new("remove", "Delete a record", REMOVE_USAGE, cmd_remove)
            .aliases(&["rm"])
            .args(&[ArgKind::LedgerKind, ArgKind::RecordId]),
        CommandEntry::new(
            "list",
            "Show per-category totals or one category's records",
            LIST_USAGE,
            cmd_list,
        )
        .aliases(&["ls"])
        .args(&[ArgKind::LedgerKind, ArgKind::Category]),
        CommandEntry::new(
            "history",
            "Show today's records and earlier ones",
            HISTORY_USAGE,
            cmd_history,
        )
        .args(&[ArgKind::LedgerKind]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: LedgerKind = parse_arg(required(args, 0, ADD_USAGE)?)?;
    let category = required(args, 1, ADD_USAGE)?.trim();
    let amount = input::parse_amount(required(args, 2, ADD_USAGE)?)?;

    let categories = context.manager.categories(kind);
    if !categories.contains(category) {
        return Err(LedgerError::CategoryNotFound(category.to_string()).into());
    }

    let date = args.get(3).map(|raw| raw.to_string()).unwrap_or_else(date::today);
    let mut record = LedgerRecord::new(category, amount, date);
    if let Some(comment) = rest(args, 4) {
        record = record.with_comment(comment);
    }

    let stored = context.manager.ledger(kind).add(record)?;
    io::print_success(format!(
        "Added {} {} to `{}` [{}].",
        kind,
        output::format_amount(stored.amount),
        stored.category,
        short_id(stored.id)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: LedgerKind = parse_arg(required(args, 0, EDIT_USAGE)?)?;
    let mut record = context.resolve_record(kind, required(args, 1, EDIT_USAGE)?)?;
    record.amount = input::parse_amount(required(args, 2, EDIT_USAGE)?)?;
    if let Some(raw) = args.get(3) {
        record.date = raw.to_string();
    }
    if let Some(comment) = rest(args, 4) {
        record = record.with_comment(comment);
    }

    if context.manager.ledger(kind).update(record.clone())? {
        io::print_success(format!("Updated record {}.", short_id(record.id)));
    } else {
        io::print_warning("Nothing changed.");
    }
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: LedgerKind = parse_arg(required(args, 0, REMOVE_USAGE)?)?;
    let record = context.resolve_record(kind, required(args, 1, REMOVE_USAGE)?)?;
    if context.manager.ledger(kind).delete_by_id(record.id)? {
        io::print_success(format!("Removed record {}.", short_id(record.id)));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: LedgerKind = parse_arg(required(args, 0, LIST_USAGE)?)?;
    let snapshot = context.view(kind).snapshot();

    if let Some(category) = args.get(1) {
        if !snapshot.categories.iter().any(|name| name == category) {
            return Err(LedgerError::CategoryNotFound(category.to_string()).into());
        }
        output::section(format!("{} / {}", kind, category));
        let records = history::for_category(&snapshot.records, category);
        if records.is_empty() {
            io::print_info("No records.");
        }
        for record in records {
            output::line(record_row(&record));
        }
        return Ok(());
    }

    output::section(format!("{} by category", kind));
    for entry in snapshot.totals.iter() {
        output::line(format!(
            "  {:<20} {:>14}",
            entry.category,
            output::format_amount(entry.total)
        ));
    }
    output::line(format!(
        "  {:<20} {:>14}",
        "Total",
        output::format_amount(snapshot.totals.grand_total())
    ));
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: LedgerKind = parse_arg(required(args, 0, HISTORY_USAGE)?)?;
    let snapshot = context.view(kind).snapshot();
    let (today, earlier) = history::split_by_day(&snapshot.records, &date::today());

    output::section("Today");
    if today.is_empty() {
        io::print_info("No records.");
    }
    for record in &today {
        output::line(record_row(record));
    }
    output::section("Earlier");
    if earlier.is_empty() {
        io::print_info("No records.");
    }
    for record in &earlier {
        output::line(record_row(record));
    }
    Ok(())
}

fn record_row(record: &LedgerRecord) -> String {
    let shown_date = date::to_entry_format(&record.date).unwrap_or_else(|| record.date.clone());
    let mut row = format!(
        "  {}  {:<10} {:<16} {:>14}",
        short_id(record.id),
        shown_date,
        record.category,
        output::format_amount(record.amount)
    );
    if let Some(comment) = &record.comment {
        row.push_str("  ");
        row.push_str(comment);
    }
    row
}
