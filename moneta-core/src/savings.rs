//! Where to park the money while the card's interest-free window runs.
//!
//! Rates are nominal annual percentages pro-rated daily over a 365-day year.
//! A tier with `fixed_term_days` models a fixed-term product and always
//! accrues over that term; other tiers accrue over the days actually
//! available.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::floor_days_between;
use crate::error::{MonetaError, Result};
use crate::format::format_vnd;

const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SavingsProduct {
    #[serde(rename = "TERM_DEPOSIT_1M")]
    TermDeposit1M,
    #[serde(rename = "FLEXIBLE_SAVINGS")]
    FlexibleSavings,
    #[serde(rename = "MMF")]
    Mmf,
    #[serde(rename = "NO_RECOMMENDATION")]
    NoRecommendation,
}

/// One product bucket: used when at least `min_days` are available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsTier {
    pub product: SavingsProduct,
    pub min_days: i64,
    pub annual_rate_percent: f64,
    /// Accrue over this many days regardless of the window length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_term_days: Option<u32>,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

impl SavingsTier {
    pub fn daily_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / DAYS_PER_YEAR
    }

    /// Days the interest formula runs over for a window of `days_available`.
    pub fn accrual_days(&self, days_available: i64) -> i64 {
        match self.fixed_term_days {
            Some(term) => i64::from(term),
            None => days_available.max(0),
        }
    }
}

/// Tiers ordered by descending `min_days`. Windows below the last tier get
/// no recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsTierConfig {
    pub tiers: Vec<SavingsTier>,
}

impl Default for SavingsTierConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                SavingsTier {
                    product: SavingsProduct::TermDeposit1M,
                    min_days: 35,
                    annual_rate_percent: 4.5,
                    fixed_term_days: Some(30),
                    product_name: "1-month online term deposit".to_string(),
                    bank_name: Some("VPBank/HDBank".to_string()),
                },
                SavingsTier {
                    product: SavingsProduct::FlexibleSavings,
                    min_days: 20,
                    annual_rate_percent: 3.5,
                    fixed_term_days: None,
                    product_name: "Flexible savings".to_string(),
                    bank_name: Some("Tikop/Finhay/iSave".to_string()),
                },
                SavingsTier {
                    product: SavingsProduct::Mmf,
                    min_days: 10,
                    annual_rate_percent: 3.0,
                    fixed_term_days: None,
                    product_name: "Short-term bond fund".to_string(),
                    bank_name: None,
                },
            ],
        }
    }
}

impl SavingsTierConfig {
    pub fn validate(&self) -> Result<()> {
        for tier in &self.tiers {
            if tier.product == SavingsProduct::NoRecommendation {
                return Err(MonetaError::InvalidConfig(
                    "NO_RECOMMENDATION is implicit and cannot be configured as a tier".to_string(),
                ));
            }
            if !tier.annual_rate_percent.is_finite() || tier.annual_rate_percent < 0.0 {
                return Err(MonetaError::InvalidConfig(format!(
                    "{:?}: annual rate {} must be a non-negative number",
                    tier.product, tier.annual_rate_percent
                )));
            }
        }
        if self.tiers.windows(2).any(|w| w[0].min_days <= w[1].min_days) {
            return Err(MonetaError::InvalidConfig(
                "savings tiers must be ordered by strictly descending min_days".to_string(),
            ));
        }
        Ok(())
    }

    /// First tier whose threshold the window reaches.
    pub fn tier_for(&self, days_available: i64) -> Option<&SavingsTier> {
        self.tiers.iter().find(|t| days_available >= t.min_days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecommendation {
    #[serde(rename = "type")]
    pub product: SavingsProduct,
    pub amount: f64,
    pub estimated_interest: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub message: String,
    pub days_available: i64,
}

/// Recommend a product using the default tiers.
pub fn recommend_savings(
    amount: f64,
    transaction_date: NaiveDateTime,
    due_date: NaiveDateTime,
) -> SavingsRecommendation {
    recommend_savings_with(&SavingsTierConfig::default(), amount, transaction_date, due_date)
}

pub fn recommend_savings_with(
    config: &SavingsTierConfig,
    amount: f64,
    transaction_date: NaiveDateTime,
    due_date: NaiveDateTime,
) -> SavingsRecommendation {
    let days_available = floor_days_between(transaction_date, due_date);

    let Some(tier) = config.tier_for(days_available) else {
        return SavingsRecommendation {
            product: SavingsProduct::NoRecommendation,
            amount,
            estimated_interest: 0.0,
            interest_rate: 0.0,
            bank_name: None,
            product_name: None,
            message: format!(
                "Only {days_available} days until the payment due date, too short to put {} to work. \
                 Keep the cash ready to pay on time.",
                format_vnd(amount)
            ),
            days_available,
        };
    };

    let accrual_days = tier.accrual_days(days_available);
    let estimated_interest = amount * tier.daily_rate() * accrual_days as f64;
    let rate = tier.annual_rate_percent;
    let interest = format_vnd(estimated_interest);
    let principal = format_vnd(amount);

    let message = match tier.product {
        SavingsProduct::TermDeposit1M => format!(
            "With {principal}, a {accrual_days}-day term deposit at {rate:.1}%/year earns about {interest} \
             within the {days_available} days before payment is due, instead of paying the bank right away."
        ),
        SavingsProduct::FlexibleSavings => format!(
            "With {principal}, flexible savings at {rate:.1}%/year for {days_available} days earns about \
             {interest}. Withdraw any time."
        ),
        SavingsProduct::Mmf => format!(
            "With {principal}, a short-term bond fund at about {rate:.1}%/year for {days_available} days \
             earns about {interest}."
        ),
        SavingsProduct::NoRecommendation => format!(
            "Keep {principal} liquid: {days_available} days available, {rate:.1}%/year, about {interest}."
        ),
    };

    SavingsRecommendation {
        product: tier.product,
        amount,
        estimated_interest,
        interest_rate: rate,
        bank_name: tier.bank_name.clone(),
        product_name: Some(tier.product_name.clone()),
        message,
        days_available,
    }
}
