//! Load and validate runtime configuration: rate table, input floors, logging.

use anyhow::Context;
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{ConfigError, ValidationError};
use crate::types::TradeRequest;

pub const CONFIG_ENV_VAR: &str = "TRADE_CALC_CONFIG";
const CONFIG_FILE: &str = "config.yaml";

/// How intraday brokerage is charged per leg.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrokeragePolicy {
    /// `fixed_brokerage` per order, regardless of leg value.
    #[default]
    Flat,
    /// `min(fixed_brokerage, brokerage_cap_rate * leg_value)`.
    Capped,
}

/// When the delivery DP charge applies. Never applies to a zero-quantity trade.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DpTrigger {
    /// Every executed delivery round trip (each one has a sell leg).
    #[default]
    SellLeg,
    /// Only when the request itself is a sell.
    ShortOnly,
    /// Sell side, or buy side exiting below entry.
    SellOrLoss,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RateTable {
    pub fixed_brokerage: Decimal,
    pub brokerage_cap_rate: Decimal,
    pub brokerage_policy: BrokeragePolicy,
    pub stt_intra_rate: Decimal,
    pub stt_equity_rate: Decimal,
    pub stamp_intra_rate: Decimal,
    pub stamp_equity_rate: Decimal,
    pub exchange_rate: Decimal,
    pub sebi_rate: Decimal,
    pub ipft_rate: Decimal,
    pub gst_rate: Decimal,
    pub dp_charge: Decimal,
    pub dp_trigger: DpTrigger,
    pub intraday_margin_multiplier: Decimal,
}

impl Default for RateTable {
    /// NSE equity schedule with a ₹20 discount-broker intraday fee.
    fn default() -> Self {
        Self {
            fixed_brokerage: Decimal::new(20, 0),
            brokerage_cap_rate: Decimal::new(3, 4),   // 0.03%
            brokerage_policy: BrokeragePolicy::Flat,
            stt_intra_rate: Decimal::new(25, 5),      // 0.025% on sell
            stt_equity_rate: Decimal::new(1, 3),      // 0.1% on both legs
            stamp_intra_rate: Decimal::new(3, 5),     // 0.003% on buy
            stamp_equity_rate: Decimal::new(15, 5),   // 0.015% on buy
            exchange_rate: Decimal::new(297, 7),      // 0.00297%
            sebi_rate: Decimal::new(1, 6),            // ₹10 / crore
            ipft_rate: Decimal::new(1, 6),            // ₹10 / crore
            gst_rate: Decimal::new(18, 2),
            dp_charge: Decimal::new(1534, 2),
            dp_trigger: DpTrigger::SellLeg,
            intraday_margin_multiplier: Decimal::new(5, 0),
        }
    }
}

impl RateTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("fixed_brokerage", self.fixed_brokerage),
            ("brokerage_cap_rate", self.brokerage_cap_rate),
            ("stt_intra_rate", self.stt_intra_rate),
            ("stt_equity_rate", self.stt_equity_rate),
            ("stamp_intra_rate", self.stamp_intra_rate),
            ("stamp_equity_rate", self.stamp_equity_rate),
            ("exchange_rate", self.exchange_rate),
            ("sebi_rate", self.sebi_rate),
            ("ipft_rate", self.ipft_rate),
            ("gst_rate", self.gst_rate),
            ("dp_charge", self.dp_charge),
        ];
        if let Some((name, _)) = rates.into_iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(ConfigError::NegativeRate { name });
        }
        if self.intraday_margin_multiplier < Decimal::ONE
            || self.intraday_margin_multiplier > Decimal::ONE_HUNDRED
        {
            return Err(ConfigError::MarginMultiplierOutOfRange);
        }
        if self.gst_rate > Decimal::ONE {
            return Err(ConfigError::GstRateAboveOne);
        }
        Ok(())
    }
}

/// Floors the front end enforces before building a request.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InputCfg {
    pub min_capital: Decimal,
    pub min_entry_price: Decimal,
}

impl Default for InputCfg {
    fn default() -> Self {
        Self {
            min_capital: Decimal::new(1000, 0),
            min_entry_price: Decimal::ONE,
        }
    }
}

impl InputCfg {
    /// Reject a request below the form floors. Values equal to a floor pass.
    pub fn check(&self, req: &TradeRequest) -> Result<(), ValidationError> {
        if req.capital() < self.min_capital {
            return Err(ValidationError::BelowFloor {
                field: "capital",
                min: self.min_capital,
            });
        }
        if req.entry_price() < self.min_entry_price {
            return Err(ValidationError::BelowFloor {
                field: "entry price",
                min: self.min_entry_price,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogCfg {
    pub level: String, // tracing filter directive, e.g. "info" or "trade_calc=debug"
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub rates: RateTable,
    pub input: InputCfg,
    pub log: LogCfg,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&s).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rates.validate()
    }

    /// Resolve the config file: explicit path, then `$TRADE_CALC_CONFIG`,
    /// then `./config.yaml`, then the per-user config dir. Falls back to
    /// built-in defaults when nothing is found.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        if let Some(p) = explicit {
            return Ok((Self::load(p)?, Some(p.to_path_buf())));
        }
        if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(p);
            return Ok((Self::load(&p)?, Some(p)));
        }
        for candidate in Self::candidate_paths() {
            if candidate.is_file() {
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dirs) = ProjectDirs::from("", "", "trade-calc") {
            paths.push(dirs.config_dir().join(CONFIG_FILE));
        }
        paths
    }
}
