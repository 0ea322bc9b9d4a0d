use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{date, LedgerKind};

/// One expense or income entry. Both ledger types share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: Uuid,
    pub category: String,
    pub amount: f64,
    pub date: String,
    #[serde(
        default,
        alias = "comments",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,
}

impl LedgerRecord {
    pub fn new(category: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            amount,
            date: date.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = if comment.trim().is_empty() {
            None
        } else {
            Some(comment)
        };
        self
    }

    /// Brings the record to its stored shape: signed per `kind`, date in storage format.
    pub fn normalized(mut self, kind: LedgerKind) -> Self {
        self.amount = kind.normalize_amount(self.amount);
        self.date = date::to_storage_format(&self.date);
        self
    }

    /// Equality on everything except the generated identifier.
    pub fn same_entry(&self, other: &LedgerRecord) -> bool {
        self.category == other.category
            && self.amount == other.amount
            && self.date == other.date
            && self.comment == other.comment
    }
}
