use crate::core::{
    views::{LedgerView, SummaryView},
    LedgerManager,
};
use crate::ledger::LedgerKind;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a running shell owns: the manager plus one active view per surface.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub expense_view: LedgerView,
    pub income_view: LedgerView,
    pub summary_view: SummaryView,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn with_manager(manager: LedgerManager, mode: CliMode) -> Self {
        let mut expense_view = manager.ledger_view(LedgerKind::Expense);
        let mut income_view = manager.ledger_view(LedgerKind::Income);
        let mut summary_view = manager.summary_view();
        expense_view.activate();
        income_view.activate();
        summary_view.activate();

        Self {
            mode,
            registry: super::commands::registry(),
            manager,
            expense_view,
            income_view,
            summary_view,
            last_command: None,
            running: true,
        }
    }

    pub fn view(&self, kind: LedgerKind) -> &LedgerView {
        match kind {
            LedgerKind::Expense => &self.expense_view,
            LedgerKind::Income => &self.income_view,
        }
    }

    pub fn prompt(&self) -> String {
        let balance = self.summary_view.snapshot().balance();
        format!("home-ledger [{}]> ", super::output::format_amount(balance))
    }
}
