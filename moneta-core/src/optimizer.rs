//! Credit card ranking by achievable interest-free window.
//!
//! For a purchase on day `d` of a month, a card whose statement closes on day
//! `s` bills the purchase on this month's statement when `d < s` and on next
//! month's statement otherwise (a purchase on the closing day itself misses
//! the cycle). Payment is due `payment_due_days` after that statement.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{add_days, add_months, clamped_date, floor_days_between, start_of_day};
use crate::card::{CardOption, CreditCardProfile, Transaction, WindowTier};
use crate::error::{MonetaError, Result};
use crate::savings::{recommend_savings_with, SavingsRecommendation, SavingsTierConfig};

/// Minimum window (days) for each card tier. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowThresholds {
    pub optimal: i64,
    pub good: i64,
    pub average: i64,
}

impl Default for WindowThresholds {
    fn default() -> Self {
        Self {
            optimal: 50,
            good: 35,
            average: 20,
        }
    }
}

impl WindowThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.optimal < self.good || self.good < self.average {
            return Err(MonetaError::InvalidConfig(format!(
                "window thresholds must be descending (optimal {} >= good {} >= average {})",
                self.optimal, self.good, self.average
            )));
        }
        Ok(())
    }

    pub fn tier_for(&self, days: i64) -> WindowTier {
        if days >= self.optimal {
            WindowTier::Optimal
        } else if days >= self.good {
            WindowTier::Good
        } else if days >= self.average {
            WindowTier::Average
        } else {
            WindowTier::NotRecommended
        }
    }
}

/// Everything the optimizer can be tuned with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub thresholds: WindowThresholds,
    #[serde(default)]
    pub savings: SavingsTierConfig,
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.savings.validate()
    }
}

/// Statement that will bill a purchase made on `transaction_date`.
///
/// `statement_day` is clamped into the month (31 becomes 30 in April, 28 or
/// 29 in February) before being compared with the purchase day.
pub fn next_statement_date(statement_day: u32, transaction_date: NaiveDate) -> NaiveDate {
    let candidate = clamped_date(
        transaction_date.year(),
        transaction_date.month(),
        statement_day,
    );
    if transaction_date.day() >= candidate.day() {
        // Months::add keeps day 31 at the target month's last day.
        let next = add_months(candidate, 1);
        clamped_date(next.year(), next.month(), statement_day)
    } else {
        candidate
    }
}

/// Rank active cards for a purchase at `transaction_date` using the default
/// thresholds.
pub fn rank_cards(cards: &[CreditCardProfile], transaction_date: NaiveDateTime) -> Vec<CardOption> {
    rank_cards_with(cards, transaction_date, &WindowThresholds::default())
}

/// Rank active cards, longest interest-free window first.
///
/// Inactive cards are skipped. Cards with equal windows keep their input
/// order.
pub fn rank_cards_with(
    cards: &[CreditCardProfile],
    transaction_date: NaiveDateTime,
    thresholds: &WindowThresholds,
) -> Vec<CardOption> {
    let mut options: Vec<CardOption> = cards
        .iter()
        .filter(|card| card.is_active)
        .map(|card| evaluate_card(card, transaction_date, thresholds))
        .collect();

    // sort_by is stable
    options.sort_by(|a, b| b.interest_free_period.cmp(&a.interest_free_period));

    debug!(
        cards = cards.len(),
        ranked = options.len(),
        best = options.first().map(|o| o.card_id.as_str()).unwrap_or("-"),
        "ranked cards"
    );
    options
}

fn evaluate_card(
    card: &CreditCardProfile,
    transaction_date: NaiveDateTime,
    thresholds: &WindowThresholds,
) -> CardOption {
    let statement = next_statement_date(card.statement_day, transaction_date.date());
    let due_date = add_days(statement, i64::from(card.payment_due_days));
    let interest_free_period = floor_days_between(transaction_date, start_of_day(due_date));
    let tier = thresholds.tier_for(interest_free_period);

    CardOption {
        card_id: card.id.clone(),
        card_name: card.card_name.clone(),
        bank_name: card.bank_name.clone(),
        last_four_digits: card.last_four_digits.clone(),
        statement_day: card.statement_day,
        interest_free_days: card.interest_free_days,
        payment_due_days: card.payment_due_days,
        next_statement_date: statement,
        due_date,
        interest_free_period,
        tier,
        recommendation: tier.label().to_string(),
    }
}

/// Best card, all options and the savings plan for one purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub best_card: CardOption,
    pub all_options: Vec<CardOption>,
    pub savings_recommendation: SavingsRecommendation,
    pub amount: f64,
    pub transaction_date: NaiveDateTime,
}

/// Rank the cards and plan the float for the best one.
///
/// Returns `None` when no card is active.
pub fn optimize(
    cards: &[CreditCardProfile],
    transaction: &Transaction,
    config: &OptimizerConfig,
) -> Option<OptimizationReport> {
    let all_options = rank_cards_with(cards, transaction.date, &config.thresholds);
    let best_card = all_options.first()?.clone();
    let savings_recommendation = recommend_savings_with(
        &config.savings,
        transaction.amount,
        transaction.date,
        start_of_day(best_card.due_date),
    );

    Some(OptimizationReport {
        best_card,
        all_options,
        savings_recommendation,
        amount: transaction.amount,
        transaction_date: transaction.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn card(id: &str, statement_day: u32, payment_due_days: u32) -> CreditCardProfile {
        CreditCardProfile::new(id, "Bank", format!("Card {id}"), "0000", statement_day, 45, payment_due_days)
    }

    #[test]
    fn test_statement_later_this_month() {
        assert_eq!(next_statement_date(20, d(2025, 3, 10)), d(2025, 3, 20));
    }

    #[test]
    fn test_statement_same_day_rolls_to_next_month() {
        assert_eq!(next_statement_date(20, d(2025, 3, 20)), d(2025, 4, 20));
    }

    #[test]
    fn test_statement_after_day_rolls_to_next_month() {
        assert_eq!(next_statement_date(20, d(2025, 3, 21)), d(2025, 4, 20));
        assert_eq!(next_statement_date(15, d(2025, 12, 31)), d(2026, 1, 15));
    }

    #[test]
    fn test_statement_day_31_clamps_in_short_months() {
        // Day 31 in a 30-day month closes on the 30th.
        assert_eq!(next_statement_date(31, d(2025, 4, 10)), d(2025, 4, 30));
        // Rolling from March 31 lands on April 30, not May 1.
        assert_eq!(next_statement_date(31, d(2025, 3, 31)), d(2025, 4, 30));
        assert_eq!(next_statement_date(31, d(2025, 1, 31)), d(2025, 2, 28));
        assert_eq!(next_statement_date(30, d(2024, 1, 30)), d(2024, 2, 29));
    }

    #[test]
    fn test_statement_on_clamped_closing_day_rolls() {
        // Feb 28 is the closing day for a day-31 card in 2025.
        assert_eq!(next_statement_date(31, d(2025, 2, 28)), d(2025, 3, 31));
    }

    #[test]
    fn test_rank_example_card() {
        // statementDay=20, due 15 days later, purchase on March 21
        let cards = vec![card("1", 20, 15)];
        let out = rank_cards(&cards, start_of_day(d(2025, 3, 21)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].next_statement_date, d(2025, 4, 20));
        assert_eq!(out[0].due_date, d(2025, 5, 5));
        assert_eq!(out[0].interest_free_period, 45);
        assert_eq!(out[0].tier, WindowTier::Good);
    }

    #[test]
    fn test_rank_time_of_day_floors() {
        let cards = vec![card("1", 20, 15)];
        let at = d(2025, 3, 21).and_hms_opt(14, 30, 0).unwrap();
        let out = rank_cards(&cards, at);
        assert_eq!(out[0].interest_free_period, 44);
    }

    #[test]
    fn test_rank_sorted_descending_and_stable() {
        let cards = vec![
            card("a", 25, 15),
            card("b", 15, 20),
            card("c", 20, 15),
            card("d", 15, 20),
        ];
        let out = rank_cards(&cards, start_of_day(d(2025, 3, 21)));
        assert_eq!(out.len(), 4);
        for pair in out.windows(2) {
            assert!(pair[0].interest_free_period >= pair[1].interest_free_period);
        }
        // b and d tie; b came first
        let b = out.iter().position(|o| o.card_id == "b").unwrap();
        let d_pos = out.iter().position(|o| o.card_id == "d").unwrap();
        assert!(b < d_pos);
    }

    #[test]
    fn test_rank_skips_inactive() {
        let cards = vec![card("1", 20, 15).inactive(), card("2", 25, 15)];
        let out = rank_cards(&cards, start_of_day(d(2025, 3, 21)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].card_id, "2");

        let none = rank_cards(&[card("1", 20, 15).inactive()], start_of_day(d(2025, 3, 21)));
        assert!(none.is_empty());
        assert!(rank_cards(&[], start_of_day(d(2025, 3, 21))).is_empty());
    }

    #[test]
    fn test_rank_degenerate_window_does_not_panic() {
        // Statement closes tomorrow and payment is due on the statement date.
        let at = d(2025, 3, 19).and_hms_opt(23, 0, 0).unwrap();
        let out = rank_cards(&[card("1", 20, 0)], at);
        assert_eq!(out[0].due_date, d(2025, 3, 20));
        assert_eq!(out[0].interest_free_period, 0);
        assert_eq!(out[0].tier, WindowTier::NotRecommended);
    }

    #[test]
    fn test_tier_boundaries_inclusive() {
        let t = WindowThresholds::default();
        assert_eq!(t.tier_for(50), WindowTier::Optimal);
        assert_eq!(t.tier_for(49), WindowTier::Good);
        assert_eq!(t.tier_for(35), WindowTier::Good);
        assert_eq!(t.tier_for(34), WindowTier::Average);
        assert_eq!(t.tier_for(20), WindowTier::Average);
        assert_eq!(t.tier_for(19), WindowTier::NotRecommended);
        assert_eq!(t.tier_for(-3), WindowTier::NotRecommended);
    }

    #[test]
    fn test_thresholds_validate() {
        let bad = WindowThresholds { optimal: 10, good: 35, average: 20 };
        assert!(bad.validate().is_err());
        assert!(WindowThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_optimize_uses_best_due_date() {
        let cards = vec![card("1", 20, 15), card("2", 25, 15), card("3", 15, 20)];
        let tx = Transaction::on(30_000_000.0, d(2025, 3, 21)).unwrap();
        let report = optimize(&cards, &tx, &OptimizerConfig::default()).unwrap();
        assert_eq!(report.best_card.card_id, report.all_options[0].card_id);
        assert_eq!(
            report.savings_recommendation.days_available,
            report.best_card.interest_free_period
        );
        assert_eq!(report.amount, 30_000_000.0);
    }

    #[test]
    fn test_optimize_without_active_cards() {
        let tx = Transaction::on(1_000.0, d(2025, 3, 21)).unwrap();
        assert!(optimize(&[], &tx, &OptimizerConfig::default()).is_none());
    }
}
