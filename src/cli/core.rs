//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use uuid::Uuid;

use crate::{
    core::LedgerManager,
    errors::LedgerError,
    ledger::{LedgerKind, LedgerRecord, LoanRecord},
};

use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = LedgerManager::open_default()?;
        Ok(Self::with_manager(manager, mode))
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.resolve(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(prompt)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action("Exit the shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    /// Finds a record of `kind` whose id starts with `prefix`.
    pub(crate) fn resolve_record(
        &self,
        kind: LedgerKind,
        prefix: &str,
    ) -> Result<LedgerRecord, CommandError> {
        let records = self.view(kind).snapshot().records;
        resolve_by_prefix(records, prefix, |record| record.id)
    }

    pub(crate) fn resolve_loan(
        &self,
        loans: Vec<LoanRecord>,
        prefix: &str,
    ) -> Result<LoanRecord, CommandError> {
        resolve_by_prefix(loans, prefix, |loan| loan.id)
    }
}

fn resolve_by_prefix<T>(
    items: Vec<T>,
    prefix: &str,
    id_of: impl Fn(&T) -> Uuid,
) -> Result<T, CommandError> {
    let needle = prefix.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(CommandError::InvalidArguments("missing id".into()));
    }
    let mut matches: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let id = id_of(item);
            id.simple().to_string().starts_with(&needle) || id.to_string().starts_with(&needle)
        })
        .collect();
    match matches.len() {
        0 => Err(CommandError::InvalidArguments(format!(
            "no entry with id `{}`",
            prefix
        ))),
        1 => Ok(matches.remove(0)),
        _ => Err(CommandError::InvalidArguments(format!(
            "id `{}` is ambiguous, type more characters",
            prefix
        ))),
    }
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// User-facing CLI error wrapper.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::shell::handle_line, config::Config};

    fn script_context() -> ShellContext {
        let manager = LedgerManager::in_memory(Config::default()).expect("manager");
        ShellContext::with_manager(manager, CliMode::Script)
    }

    fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match handle_line(context, line) {
                Ok(_) => {}
                Err(err) => panic!("`{line}` failed: {err}"),
            }
        }
    }

    #[test]
    fn views_follow_shell_mutations() {
        let mut context = script_context();
        run(
            &mut context,
            &[
                "category add expense Rent",
                "category add expense Food",
                "add expense Food 50 2024-01-01",
                "add expense Rent 200 01/01/2024 \"January rent\"",
                "add expense Food 30 2024-01-02",
                "add income Salary 1000 2024-01-05",
            ],
        );

        let totals = context.expense_view.totals();
        assert_eq!(totals.get("Rent"), Some(-200.0));
        assert_eq!(totals.get("Food"), Some(-80.0));
        assert_eq!(totals.grand_total(), -280.0);
        assert_eq!(context.summary_view.snapshot().balance(), 720.0);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut context = script_context();
        let err = handle_line(&mut context, "add expense Travel 10").unwrap_err();
        assert!(matches!(err, CommandError::Core(LedgerError::CategoryNotFound(_))));
        assert!(context.expense_view.snapshot().records.is_empty());
    }

    #[test]
    fn non_numeric_amount_creates_nothing() {
        let mut context = script_context();
        run(&mut context, &["category add expense Food"]);
        assert!(handle_line(&mut context, "add expense Food lots").is_err());
        assert!(context.expense_view.snapshot().records.is_empty());
    }

    #[test]
    fn records_resolve_by_id_prefix() {
        let mut context = script_context();
        run(&mut context, &["add income Salary 10 2024-01-01"]);
        let record = context.income_view.snapshot().records[0].clone();
        let resolved = context
            .resolve_record(LedgerKind::Income, &short_id(record.id))
            .expect("resolve");
        assert_eq!(resolved.id, record.id);
        assert!(context.resolve_record(LedgerKind::Income, "zzzz").is_err());
    }

    #[test]
    fn edit_and_remove_by_short_id() {
        let mut context = script_context();
        run(&mut context, &["add income Gifts 10 2024-01-01"]);
        let id = short_id(context.income_view.snapshot().records[0].id);
        run(&mut context, &[&format!("edit income {id} 25")]);
        assert_eq!(context.income_view.totals().get("Gifts"), Some(25.0));
        run(&mut context, &[&format!("remove income {id}")]);
        assert!(context.income_view.snapshot().records.is_empty());
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = script_context();
        assert_eq!(handle_line(&mut context, "exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }
}
