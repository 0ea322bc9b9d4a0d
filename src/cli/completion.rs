//! Context-aware completion: command words, ledger kinds, category names and
//! short record ids taken from the shell's current state.

use crate::cli::core::short_id;
use crate::cli::registry::{ArgKind, CommandRegistry};
use crate::cli::shell_context::ShellContext;
use crate::ledger::{LedgerKind, LoanKind};

const LEDGER_KINDS: &[&str] = &["expense", "income"];
const LOAN_KINDS: &[&str] = &["borrowed", "issued"];

/// Snapshot of everything the completer can offer, rebuilt before each prompt.
#[derive(Debug, Default, Clone)]
pub(crate) struct CompletionIndex {
    commands: Vec<(&'static str, Vec<ArgKind>)>,
    expense_categories: Vec<String>,
    income_categories: Vec<String>,
    expense_ids: Vec<String>,
    income_ids: Vec<String>,
    borrowed_ids: Vec<String>,
    issued_ids: Vec<String>,
}

impl CompletionIndex {
    pub(crate) fn from_context(context: &ShellContext) -> Self {
        let expense = context.expense_view.snapshot();
        let income = context.income_view.snapshot();
        let loan_ids = |kind: LoanKind| -> Vec<String> {
            context
                .manager
                .loans(kind)
                .load()
                .iter()
                .map(|loan| short_id(loan.id))
                .collect()
        };
        Self {
            commands: command_table(&context.registry),
            expense_ids: expense.records.iter().map(|record| short_id(record.id)).collect(),
            income_ids: income.records.iter().map(|record| short_id(record.id)).collect(),
            expense_categories: expense.categories,
            income_categories: income.categories,
            borrowed_ids: loan_ids(LoanKind::Borrowed),
            issued_ids: loan_ids(LoanKind::Issued),
        }
    }

    /// Candidates for `partial`, given the complete words typed before it.
    pub(crate) fn candidates(&self, words: &[String], partial: &str) -> Vec<String> {
        let Some((command, args)) = words.split_first() else {
            return matching(self.commands.iter().map(|(word, _)| *word), partial);
        };
        let Some(slots) = self.slots(command) else {
            return Vec::new();
        };
        let position = args.len();
        match slots.get(position).copied().unwrap_or(ArgKind::Text) {
            ArgKind::Action(actions) => matching(actions.iter().copied(), partial),
            ArgKind::LedgerKind => matching(LEDGER_KINDS.iter().copied(), partial),
            ArgKind::LoanKind => matching(LOAN_KINDS.iter().copied(), partial),
            ArgKind::Command => matching(self.commands.iter().map(|(word, _)| *word), partial),
            ArgKind::Category => {
                let names = match ledger_kind(args) {
                    LedgerKind::Expense => &self.expense_categories,
                    LedgerKind::Income => &self.income_categories,
                };
                matching(names.iter().map(String::as_str), partial)
            }
            ArgKind::RecordId => {
                let ids = match ledger_kind(args) {
                    LedgerKind::Expense => &self.expense_ids,
                    LedgerKind::Income => &self.income_ids,
                };
                matching(ids.iter().map(String::as_str), partial)
            }
            ArgKind::LoanId => {
                if !args.first().map_or(false, |action| action == "remove") {
                    return Vec::new();
                }
                let ids = match args.get(1).and_then(|raw| raw.parse::<LoanKind>().ok()) {
                    Some(LoanKind::Borrowed) => &self.borrowed_ids,
                    Some(LoanKind::Issued) => &self.issued_ids,
                    None => return Vec::new(),
                };
                matching(ids.iter().map(String::as_str), partial)
            }
            ArgKind::Text => Vec::new(),
        }
    }

    fn slots(&self, command: &str) -> Option<&[ArgKind]> {
        let command = command.to_lowercase();
        self.commands
            .iter()
            .find(|(word, _)| *word == command)
            .map(|(_, slots)| slots.as_slice())
    }
}

fn command_table(registry: &CommandRegistry) -> Vec<(&'static str, Vec<ArgKind>)> {
    registry
        .words()
        .filter_map(|word| {
            registry
                .resolve(word)
                .map(|entry| (word, entry.args.to_vec()))
        })
        .collect()
}

/// The ledger kind named among `args`; limits and bare lines default to expense.
fn ledger_kind(args: &[String]) -> LedgerKind {
    args.iter()
        .find_map(|arg| arg.parse::<LedgerKind>().ok())
        .unwrap_or(LedgerKind::Expense)
}

/// Case-insensitive prefix match; names with spaces come back quoted.
fn matching<'a>(options: impl Iterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let needle = partial.trim_start_matches(&['"', '\''][..]).to_lowercase();
    options
        .filter(|option| option.to_lowercase().starts_with(&needle))
        .map(|option| shell_words::quote(option).into_owned())
        .collect()
}
