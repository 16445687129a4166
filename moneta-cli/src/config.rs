use anyhow::{Context, Result};
use moneta_core::rebalance::DEFAULT_TOLERANCE_PERCENT;
use moneta_core::time::DEFAULT_TIMEZONE;
use moneta_core::{OptimizerConfig, SavingsTierConfig, WindowThresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_moneta_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub optimizer: WindowThresholds,
    #[serde(default)]
    pub savings: SavingsTierConfig,
    #[serde(default)]
    pub rebalance: RebalanceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSection {
    /// IANA zone used for "now" and for RFC 3339 input
    pub timezone: String,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceSection {
    pub tolerance_percent: f64,
}

impl Default for RebalanceSection {
    fn default() -> Self {
        Self {
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
        }
    }
}

impl Config {
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            thresholds: self.optimizer,
            savings: self.savings.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        moneta_core::time::parse_timezone(&self.general.timezone)?;
        self.optimizer_config().validate()?;
        if !self.rebalance.tolerance_percent.is_finite() || self.rebalance.tolerance_percent < 0.0 {
            anyhow::bail!(
                "rebalance.tolerance_percent must be a non-negative number, got {}",
                self.rebalance.tolerance_percent
            );
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moneta_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    cfg.validate().context("validate config.toml")?;
    Ok(cfg)
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
