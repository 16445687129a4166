//! Investment assets and portfolio profit/loss.

use serde::{Deserialize, Serialize};

/// USDT→VND rate used when a crypto holding carries none.
pub const DEFAULT_USDT_VND_RATE: f64 = 24_500.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pnl {
    pub pnl: f64,
    pub pnl_percent: f64,
}

/// Profit/loss of a position bought at `average_price`.
pub fn calculate_pnl(current_price: f64, average_price: f64, quantity: f64) -> Pnl {
    let pnl = (current_price - average_price) * quantity;
    let pnl_percent = if average_price != 0.0 {
        (current_price - average_price) / average_price * 100.0
    } else {
        0.0
    };
    Pnl { pnl, pnl_percent }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Crypto,
    Gold,
    Funds,
    Cash,
    RealEstate,
}

/// A holding, valued in VND.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Asset {
    /// Prices in USDT
    #[serde(rename_all = "camelCase")]
    Crypto {
        symbol: String,
        balance: f64,
        average_price: f64,
        current_price: f64,
        #[serde(default = "default_usdt_vnd_rate")]
        usdt_vnd_rate: f64,
    },
    #[serde(rename_all = "camelCase")]
    Gold {
        name: String,
        quantity: f64,
        purchase_price: f64,
        current_price: f64,
    },
    #[serde(rename_all = "camelCase")]
    Funds {
        name: String,
        units: f64,
        purchase_nav: f64,
        current_nav: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cash { name: String, amount: f64 },
    #[serde(rename_all = "camelCase")]
    RealEstate {
        name: String,
        purchase_price: f64,
        current_value: f64,
    },
}

fn default_usdt_vnd_rate() -> f64 {
    DEFAULT_USDT_VND_RATE
}

impl Asset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Crypto { .. } => AssetKind::Crypto,
            Asset::Gold { .. } => AssetKind::Gold,
            Asset::Funds { .. } => AssetKind::Funds,
            Asset::Cash { .. } => AssetKind::Cash,
            Asset::RealEstate { .. } => AssetKind::RealEstate,
        }
    }

    /// Current value in VND
    pub fn value(&self) -> f64 {
        match self {
            Asset::Crypto { balance, current_price, usdt_vnd_rate, .. } => {
                balance * current_price * usdt_vnd_rate
            }
            Asset::Gold { quantity, current_price, .. } => quantity * current_price,
            Asset::Funds { units, current_nav, .. } => units * current_nav,
            Asset::Cash { amount, .. } => *amount,
            Asset::RealEstate { current_value, .. } => *current_value,
        }
    }

    /// Cost basis in VND. Cash is carried at face value.
    pub fn cost(&self) -> f64 {
        match self {
            Asset::Crypto { balance, average_price, usdt_vnd_rate, .. } => {
                balance * average_price * usdt_vnd_rate
            }
            Asset::Gold { quantity, purchase_price, .. } => quantity * purchase_price,
            Asset::Funds { units, purchase_nav, .. } => units * purchase_nav,
            Asset::Cash { amount, .. } => *amount,
            Asset::RealEstate { purchase_price, .. } => *purchase_price,
        }
    }

    pub fn pnl(&self) -> Pnl {
        let (value, cost) = (self.value(), self.cost());
        Pnl {
            pnl: value - cost,
            pnl_percent: if cost > 0.0 { (value - cost) / cost * 100.0 } else { 0.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct KindTotal {
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    pub by_kind: Vec<(AssetKind, KindTotal)>,
}

impl PortfolioSummary {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let mut by_kind: Vec<(AssetKind, KindTotal)> = Vec::new();
        let mut total_value = 0.0;
        let mut total_cost = 0.0;

        for asset in assets {
            let value = asset.value();
            total_value += value;
            total_cost += asset.cost();

            let kind = asset.kind();
            match by_kind.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, total)) => {
                    total.value += value;
                    total.count += 1;
                }
                None => by_kind.push((kind, KindTotal { value, count: 1 })),
            }
        }
        by_kind.sort_by_key(|(k, _)| *k);

        let pnl = total_value - total_cost;
        Self {
            total_value,
            total_cost,
            pnl,
            pnl_percent: if total_cost > 0.0 { pnl / total_cost * 100.0 } else { 0.0 },
            by_kind,
        }
    }

    /// Share of the portfolio held in `kind`, in percent.
    pub fn allocation_percent(&self, kind: AssetKind) -> f64 {
        if self.total_value <= 0.0 {
            return 0.0;
        }
        self.by_kind
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, t)| t.value / self.total_value * 100.0)
            .unwrap_or(0.0)
    }
}
