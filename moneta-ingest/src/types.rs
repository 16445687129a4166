use moneta_core::CreditCardProfile;
use serde::{Deserialize, Serialize};

/// A validated card row, waiting for the store to assign it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDraft {
    pub bank_name: String,
    pub card_name: String,
    pub last_four_digits: String,
    pub statement_day: u32,
    pub interest_free_days: u32,
    pub payment_due_days: u32,
    pub credit_limit: Option<f64>,
    pub notes: Option<String>,
}

impl CardDraft {
    pub fn into_profile(self, id: impl Into<String>) -> CreditCardProfile {
        CreditCardProfile {
            id: id.into(),
            bank_name: self.bank_name,
            card_name: self.card_name,
            last_four_digits: self.last_four_digits,
            statement_day: self.statement_day,
            interest_free_days: self.interest_free_days,
            payment_due_days: self.payment_due_days,
            is_active: true,
            credit_limit: self.credit_limit,
            notes: self.notes,
        }
    }
}

/// A CSV row that failed validation. `line` is 1-based and counts the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub cards: Vec<CardDraft>,
    pub rejected: Vec<RejectedRow>,
}
