use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::{LedgerError, Result},
    ledger::{LoanKind, LoanRecord},
    storage::{read_or_default, write_json, KeyValueStore},
};

/// Borrowed or issued loans. Loans are not tied to categories or notifications.
#[derive(Clone)]
pub struct LoanStore {
    kind: LoanKind,
    backend: Arc<dyn KeyValueStore>,
}

impl LoanStore {
    pub fn new(kind: LoanKind, backend: Arc<dyn KeyValueStore>) -> Self {
        Self { kind, backend }
    }

    pub fn kind(&self) -> LoanKind {
        self.kind
    }

    pub fn load(&self) -> Vec<LoanRecord> {
        read_or_default(self.backend.as_ref(), self.kind.storage_key())
    }

    pub fn add(&self, loan: LoanRecord) -> Result<LoanRecord> {
        let loan = validated(loan)?;
        let mut loans = self.load();
        loans.push(loan.clone());
        self.save(&loans)?;
        tracing::info!(kind = %self.kind, id = %loan.id, amount = loan.amount, "loan added");
        Ok(loan)
    }

    pub fn update(&self, loan: LoanRecord) -> Result<bool> {
        let loan = validated(loan)?;
        let mut loans = self.load();
        let Some(slot) = loans.iter_mut().find(|existing| existing.id == loan.id) else {
            return Ok(false);
        };
        *slot = loan;
        self.save(&loans)?;
        tracing::info!(kind = %self.kind, "loan updated");
        Ok(true)
    }

    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let mut loans = self.load();
        let before = loans.len();
        loans.retain(|loan| loan.id != id);
        if loans.len() == before {
            return Ok(false);
        }
        self.save(&loans)?;
        tracing::info!(kind = %self.kind, %id, "loan deleted");
        Ok(true)
    }

    pub fn total(&self) -> f64 {
        self.load().iter().map(|loan| loan.amount).sum()
    }

    fn save(&self, loans: &[LoanRecord]) -> Result<()> {
        write_json(self.backend.as_ref(), self.kind.storage_key(), loans)
    }
}

fn validated(loan: LoanRecord) -> Result<LoanRecord> {
    if !loan.amount.is_finite() {
        return Err(LedgerError::InvalidInput("loan amount must be a number".into()));
    }
    let counterparty = loan.counterparty_name.trim().to_string();
    if counterparty.is_empty() {
        return Err(LedgerError::InvalidInput(
            "loan counterparty must not be blank".into(),
        ));
    }
    Ok(LoanRecord {
        counterparty_name: counterparty,
        ..loan.normalized()
    })
}
