//! moneta-core: credit card float optimizer and personal-finance calculators

pub mod calendar;
pub mod card;
pub mod error;
pub mod format;
pub mod goals;
pub mod optimizer;
pub mod portfolio;
pub mod rebalance;
pub mod savings;
pub mod time;

pub use card::{CardOption, CreditCardProfile, Transaction, WindowTier};
pub use error::{MonetaError, Result};
pub use format::{format_percent, format_vnd};
pub use goals::{GoalPriority, GoalType, InvestmentGoal};
pub use optimizer::{
    next_statement_date, optimize, rank_cards, rank_cards_with, OptimizationReport,
    OptimizerConfig, WindowThresholds,
};
pub use portfolio::{calculate_pnl, Asset, AssetKind, Pnl, PortfolioSummary};
pub use rebalance::{plan_rebalance, plan_rebalance_with, AllocationTarget, RebalanceAction, RebalancePlan};
pub use savings::{
    recommend_savings, recommend_savings_with, SavingsProduct, SavingsRecommendation,
    SavingsTier, SavingsTierConfig,
};
