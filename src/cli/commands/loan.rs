use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry};
use crate::core::input;
use crate::ledger::{date, LoanKind, LoanRecord};

use super::{parse_arg, required, rest};

const USAGE: &str = "loan <list|add|remove> <borrowed|issued> [args]";
const ADD_USAGE: &str =
    "loan add <borrowed|issued> <counterparty> <amount> <issue-date> <due-date> [comment]";
const REMOVE_USAGE: &str = "loan remove <borrowed|issued> <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "loan",
        "Track money borrowed from or lent to someone",
        USAGE,
        cmd_loan,
    )
    .args(&[
        ArgKind::Action(&["list", "add", "remove"]),
        ArgKind::LoanKind,
        ArgKind::LoanId,
    ])]
}

fn cmd_loan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = required(args, 0, USAGE)?.to_lowercase();
    let kind: LoanKind = parse_arg(required(args, 1, USAGE)?)?;

    match action.as_str() {
        "list" => list(context, kind),
        "add" => {
            let counterparty = required(args, 2, ADD_USAGE)?;
            let amount = input::parse_amount(required(args, 3, ADD_USAGE)?)?;
            let issue_date = required(args, 4, ADD_USAGE)?;
            let due_date = required(args, 5, ADD_USAGE)?;
            let mut loan = LoanRecord::new(amount, counterparty, issue_date, due_date);
            if let Some(comment) = rest(args, 6) {
                loan = loan.with_comment(comment);
            }
            let stored = context.manager.loans(kind).add(loan)?;
            io::print_success(format!(
                "Loan {} with `{}` recorded [{}].",
                kind,
                stored.counterparty_name,
                short_id(stored.id)
            ));
            Ok(())
        }
        "remove" => {
            let store = context.manager.loans(kind);
            let loan = context.resolve_loan(store.load(), required(args, 2, REMOVE_USAGE)?)?;
            if context.manager.loans(kind).delete(loan.id)? {
                io::print_success(format!("Loan {} removed.", short_id(loan.id)));
            }
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown loan action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn list(context: &ShellContext, kind: LoanKind) -> CommandResult {
    let store = context.manager.loans(kind);
    let loans = store.load();
    output::section(format!("Loans {}", kind));
    if loans.is_empty() {
        io::print_info("No loans.");
    }
    for loan in &loans {
        let due = date::to_entry_format(&loan.due_date).unwrap_or_else(|| loan.due_date.clone());
        output::line(format!(
            "  {}  {:<20} {:>14}  due {}  {}",
            short_id(loan.id),
            loan.counterparty_name,
            output::format_amount(loan.amount),
            due,
            loan.comment
        ));
    }
    output::line(format!("  Total {}", output::format_amount(store.total())));
    Ok(())
}
