use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::date;
use crate::errors::LedgerError;

/// Direction of a loan: money the user owes or money owed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanKind {
    Borrowed,
    Issued,
}

impl LoanKind {
    pub fn storage_key(self) -> &'static str {
        match self {
            LoanKind::Borrowed => "loan.borrowed",
            LoanKind::Issued => "loan.issued",
        }
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanKind::Borrowed => f.write_str("borrowed"),
            LoanKind::Issued => f.write_str("issued"),
        }
    }
}

impl FromStr for LoanKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "borrowed" => Ok(LoanKind::Borrowed),
            "issued" => Ok(LoanKind::Issued),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown loan type `{other}` (expected borrowed or issued)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub amount: f64,
    #[serde(alias = "borrowerName")]
    pub counterparty_name: String,
    pub issue_date: String,
    pub due_date: String,
    #[serde(default)]
    pub comment: String,
    pub id: Uuid,
}

impl LoanRecord {
    pub fn new(
        amount: f64,
        counterparty_name: impl Into<String>,
        issue_date: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            counterparty_name: counterparty_name.into(),
            issue_date: issue_date.into(),
            due_date: due_date.into(),
            comment: String::new(),
            id: Uuid::new_v4(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn normalized(mut self) -> Self {
        self.issue_date = date::to_storage_format(&self.issue_date);
        self.due_date = date::to_storage_format(&self.due_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_legacy_borrower_name() {
        let json = r#"{"amount":300.0,"borrowerName":"Ivan","issueDate":"2024-01-01","dueDate":"2024-06-01","comment":"","id":"0c5b1f8e-2a4c-4a63-9a55-3b5d8f0f6c11"}"#;
        let loan: LoanRecord = serde_json::from_str(json).expect("decode");
        assert_eq!(loan.counterparty_name, "Ivan");
    }

    #[test]
    fn normalized_converts_both_dates() {
        let loan = LoanRecord::new(10.0, "Olena", "01/01/2024", "15/02/2024").normalized();
        assert_eq!(loan.issue_date, "2024-01-01");
        assert_eq!(loan.due_date, "2024-02-15");
    }

    #[test]
    fn parses_kinds() {
        assert_eq!("Issued".parse::<LoanKind>().unwrap(), LoanKind::Issued);
        assert!("lent".parse::<LoanKind>().is_err());
        assert_eq!(LoanKind::Borrowed.storage_key(), "loan.borrowed");
    }
}
