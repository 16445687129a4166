//! Investment goals and savings pace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    Retirement,
    House,
    Education,
    Emergency,
    Travel,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentGoal {
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub priority: GoalPriority,
    #[serde(default)]
    pub monthly_contribution: Option<f64>,
    #[serde(default)]
    pub is_completed: bool,
}

impl InvestmentGoal {
    pub fn new(
        name: impl Into<String>,
        goal_type: GoalType,
        target_amount: f64,
        deadline: NaiveDate,
        priority: GoalPriority,
    ) -> Self {
        Self {
            name: name.into(),
            goal_type,
            target_amount,
            current_amount: 0.0,
            deadline,
            priority,
            monthly_contribution: None,
            is_completed: false,
        }
    }

    pub fn with_current(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_monthly_contribution(mut self, amount: f64) -> Self {
        self.monthly_contribution = Some(amount);
        self
    }

    /// Percent of target reached; 0 for a zero target.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount * 100.0
        } else {
            0.0
        }
    }

    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    /// Months until the deadline, counting 30-day months and rounding up.
    /// Zero or negative once the deadline has passed.
    pub fn months_remaining(&self, today: NaiveDate) -> i64 {
        let days = (self.deadline - today).num_days();
        (days + 29).div_euclid(30)
    }

    /// Contribution per month needed to hit the target on time; 0 once no
    /// month is left.
    pub fn monthly_needed(&self, today: NaiveDate) -> f64 {
        let months = self.months_remaining(today);
        if months <= 0 {
            return 0.0;
        }
        self.remaining_amount() / months as f64
    }

    /// How much the current monthly contribution falls short, if at all.
    pub fn contribution_gap(&self, today: NaiveDate) -> f64 {
        let current = self.monthly_contribution.unwrap_or(0.0);
        (self.monthly_needed(today) - current).max(0.0)
    }

    pub fn is_reached(&self) -> bool {
        self.is_completed || self.progress_percent() >= 100.0
    }
}
