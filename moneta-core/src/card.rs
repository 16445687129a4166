//! Credit card records and the transaction they are ranked against.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::start_of_day;
use crate::error::{MonetaError, Result};

/// A credit card as supplied by the caller's card store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardProfile {
    /// Unique within the supplied set
    pub id: String,
    pub bank_name: String,
    pub card_name: String,
    pub last_four_digits: String,
    /// Day of month the statement closes (1..=31)
    pub statement_day: u32,
    /// Bank-advertised grace period. Informational only.
    pub interest_free_days: u32,
    /// Days after the statement date by which payment is due
    pub payment_due_days: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_active() -> bool {
    true
}

impl CreditCardProfile {
    /// Create an active card with no limit or notes.
    pub fn new(
        id: impl Into<String>,
        bank_name: impl Into<String>,
        card_name: impl Into<String>,
        last_four_digits: impl Into<String>,
        statement_day: u32,
        interest_free_days: u32,
        payment_due_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            bank_name: bank_name.into(),
            card_name: card_name.into(),
            last_four_digits: last_four_digits.into(),
            statement_day,
            interest_free_days,
            payment_due_days,
            is_active: true,
            credit_limit: None,
            notes: None,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_credit_limit(mut self, limit: f64) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    /// Check the fields the optimizer relies on.
    pub fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.statement_day) {
            return Err(MonetaError::InvalidStatementDay(self.statement_day));
        }
        let invalid = |reason: &str| MonetaError::InvalidCard {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if self.bank_name.trim().is_empty() {
            return Err(invalid("bank name is empty"));
        }
        if self.card_name.trim().is_empty() {
            return Err(invalid("card name is empty"));
        }
        if let Some(limit) = self.credit_limit {
            if !limit.is_finite() || limit < 0.0 {
                return Err(MonetaError::InvalidCard {
                    id: self.id.clone(),
                    reason: format!("credit limit {limit} is not a non-negative number"),
                });
            }
        }
        Ok(())
    }

    /// Short label for listings, e.g. "VIB Online Plus ••1234".
    pub fn display_name(&self) -> String {
        format!(
            "{} {} ••{}",
            self.bank_name, self.card_name, self.last_four_digits
        )
    }
}

/// A prospective purchase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub amount: f64,
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Reject negative, NaN or infinite amounts.
    pub fn new(amount: f64, date: NaiveDateTime) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(MonetaError::InvalidAmount(amount));
        }
        Ok(Self { amount, date })
    }

    /// Transaction at midnight of `date`.
    pub fn on(amount: f64, date: NaiveDate) -> Result<Self> {
        Self::new(amount, start_of_day(date))
    }
}

/// Interest-free window quality of a card option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowTier {
    Optimal,
    Good,
    Average,
    NotRecommended,
}

impl WindowTier {
    pub fn label(&self) -> &'static str {
        match self {
            WindowTier::Optimal => "optimal, maximizes interest-free window",
            WindowTier::Good => "good, enough time for a 1-month term deposit",
            WindowTier::Average => "average, consider flexible savings",
            WindowTier::NotRecommended => "not recommended, window too short",
        }
    }
}

/// One card's outcome for a given transaction date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardOption {
    pub card_id: String,
    pub card_name: String,
    pub bank_name: String,
    pub last_four_digits: String,
    pub statement_day: u32,
    pub interest_free_days: u32,
    pub payment_due_days: u32,
    pub next_statement_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Whole days from the transaction to the due date (may be <= 0)
    pub interest_free_period: i64,
    pub tier: WindowTier,
    pub recommendation: String,
}

impl CardOption {
    /// True when the computed window is longer than the bank advertises.
    ///
    /// The advertised figure never feeds the calculation; this only surfaces
    /// the mismatch so callers can show it.
    pub fn exceeds_advertised(&self) -> bool {
        self.interest_free_period > i64::from(self.interest_free_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_statement_day() {
        let card = CreditCardProfile::new("1", "VIB", "Online Plus", "1234", 20, 55, 15);
        assert!(card.validate().is_ok());

        let mut bad = card.clone();
        bad.statement_day = 0;
        assert_eq!(bad.validate(), Err(MonetaError::InvalidStatementDay(0)));
        bad.statement_day = 32;
        assert_eq!(bad.validate(), Err(MonetaError::InvalidStatementDay(32)));
    }

    #[test]
    fn test_validate_requires_names() {
        let blank_bank = CreditCardProfile::new("1", " ", "Online Plus", "1234", 20, 55, 15);
        assert_eq!(
            blank_bank.validate(),
            Err(MonetaError::InvalidCard {
                id: "1".to_string(),
                reason: "bank name is empty".to_string(),
            })
        );

        let blank_card = CreditCardProfile::new("1", "VIB", "", "1234", 20, 55, 15);
        assert!(matches!(blank_card.validate(), Err(MonetaError::InvalidCard { .. })));
    }

    #[test]
    fn test_validate_credit_limit() {
        let card = CreditCardProfile::new("1", "VIB", "Online Plus", "1234", 20, 55, 15)
            .with_credit_limit(-5.0);
        assert!(matches!(card.validate(), Err(MonetaError::InvalidCard { .. })));
    }

    #[test]
    fn test_transaction_rejects_bad_amounts() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        assert!(Transaction::on(0.0, date).is_ok());
        assert!(Transaction::on(30_000_000.0, date).is_ok());
        assert_eq!(Transaction::on(-1.0, date), Err(MonetaError::InvalidAmount(-1.0)));
        assert!(Transaction::on(f64::NAN, date).is_err());
        assert!(Transaction::on(f64::INFINITY, date).is_err());
    }

    #[test]
    fn test_profile_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "id": "2",
            "bankName": "Techcombank",
            "cardName": "Cash Back",
            "lastFourDigits": "5678",
            "statementDay": 25,
            "interestFreeDays": 45,
            "paymentDueDays": 15
        }"#;
        let card: CreditCardProfile = serde_json::from_str(json).unwrap();
        assert!(card.is_active);
        assert_eq!(card.statement_day, 25);
        assert_eq!(card.credit_limit, None);
    }

    #[test]
    fn test_window_tier_serializes_screaming_case() {
        let s = serde_json::to_string(&WindowTier::NotRecommended).unwrap();
        assert_eq!(s, "\"NOT_RECOMMENDED\"");
    }
}
