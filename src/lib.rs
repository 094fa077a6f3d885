//! Trade what-if calculator: position sizing, exit projection, itemized
//! Indian equity charges and net P&L for intraday and delivery trades.

pub mod charges;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod report;
pub mod types;
pub mod utils;

pub use config::{AppConfig, BrokeragePolicy, DpTrigger, RateTable};
pub use engine::FeeEngine;
pub use error::{ConfigError, ValidationError};
pub use types::{
    ChargeBreakdown, Mode, RawTradeInput, Side, TargetPreset, TargetSelection, TradeRequest,
    TradeResult,
};
