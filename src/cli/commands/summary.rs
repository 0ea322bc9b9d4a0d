use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::{views::summary_view::BalanceState, CategoryTotals};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show income, expenses, balance and category shares",
        "summary",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.summary_view.snapshot();

    output::section("Summary");
    output::line(format!(
        "  {:<20} {:>14}",
        "Income",
        output::format_amount(snapshot.total_incomes())
    ));
    output::line(format!(
        "  {:<20} {:>14}",
        "Expenses",
        output::format_amount(snapshot.total_expenses())
    ));
    let balance = format!(
        "  {:<20} {:>14} {}",
        "Balance",
        output::format_amount(snapshot.balance()),
        context.manager.config().currency
    );
    match snapshot.balance_state() {
        BalanceState::Deficit => io::print_error(balance),
        BalanceState::Even => output::line(balance),
        BalanceState::Surplus => io::print_success(balance),
    }

    print_shares("Expense shares", &snapshot.expenses);
    print_shares("Income shares", &snapshot.incomes);
    Ok(())
}

fn print_shares(title: &str, totals: &CategoryTotals) {
    output::section(title);
    if totals.grand_total() == 0.0 {
        io::print_info("Nothing recorded.");
        return;
    }
    for (category, share) in totals.shares() {
        output::line(format!("  {:<20} {:>6.1}%", category, share));
    }
}
