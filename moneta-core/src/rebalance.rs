//! Allocation drift against target weights.

use serde::{Deserialize, Serialize};

/// Drift (percentage points) under which a class is left alone.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 2.0;
/// Drift, as a share of the whole portfolio, that makes a trade urgent.
pub const HIGH_PRIORITY_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationTarget {
    pub asset_class: String,
    pub name: String,
    pub target_percent: f64,
    pub current_value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceAction {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DriftPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationLine {
    pub asset_class: String,
    pub name: String,
    pub target_percent: f64,
    pub current_percent: f64,
    pub current_value: f64,
    pub target_value: f64,
    /// Positive when over target
    pub difference: f64,
    pub action: RebalanceAction,
    pub priority: DriftPriority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalancePlan {
    pub total_value: f64,
    pub lines: Vec<AllocationLine>,
}

impl RebalancePlan {
    pub fn is_balanced(&self) -> bool {
        self.lines.iter().all(|l| l.action == RebalanceAction::Hold)
    }

    /// Lines that need a trade, largest absolute difference first.
    pub fn trades(&self) -> Vec<&AllocationLine> {
        let mut out: Vec<&AllocationLine> = self
            .lines
            .iter()
            .filter(|l| l.action != RebalanceAction::Hold)
            .collect();
        out.sort_by(|a, b| b.difference.abs().total_cmp(&a.difference.abs()));
        out
    }
}

pub fn plan_rebalance(targets: &[AllocationTarget]) -> RebalancePlan {
    plan_rebalance_with(targets, DEFAULT_TOLERANCE_PERCENT)
}

/// Compare current values with target weights.
///
/// An empty input or a zero total produces an empty plan.
pub fn plan_rebalance_with(targets: &[AllocationTarget], tolerance_percent: f64) -> RebalancePlan {
    let total_value: f64 = targets.iter().map(|t| t.current_value).sum();
    if total_value <= 0.0 {
        return RebalancePlan { total_value, lines: Vec::new() };
    }

    let lines = targets
        .iter()
        .map(|t| {
            let current_percent = t.current_value / total_value * 100.0;
            let target_value = t.target_percent / 100.0 * total_value;
            let difference = t.current_value - target_value;
            let drift = current_percent - t.target_percent;

            let action = if drift.abs() < tolerance_percent {
                RebalanceAction::Hold
            } else if drift > 0.0 {
                RebalanceAction::Sell
            } else {
                RebalanceAction::Buy
            };

            let share = (difference / total_value * 100.0).abs();
            let priority = if share >= HIGH_PRIORITY_PERCENT {
                DriftPriority::High
            } else if share >= tolerance_percent {
                DriftPriority::Medium
            } else {
                DriftPriority::Low
            };

            AllocationLine {
                asset_class: t.asset_class.clone(),
                name: t.name.clone(),
                target_percent: t.target_percent,
                current_percent: (current_percent * 10.0).round() / 10.0,
                current_value: t.current_value,
                target_value: target_value.round(),
                difference: difference.round(),
                action,
                priority,
            }
        })
        .collect();

    RebalancePlan { total_value, lines }
}
