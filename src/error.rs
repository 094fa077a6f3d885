//! Typed errors for request validation and rate-table configuration.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected trade input. Never coerced; the caller must fix the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("capital must be greater than zero")]
    CapitalNotPositive,

    #[error("enter a valid entry price (must be greater than zero)")]
    EntryPriceNotPositive,

    #[error("entry price must be at least one tick (0.01)")]
    EntryPriceBelowTick,

    #[error("unrecognized target selection: {0:?}")]
    UnknownTarget(String),

    #[error("unrecognized trade side: {0:?} (expected buy or sell)")]
    UnknownSide(String),

    #[error("unrecognized trading mode: {0:?} (expected intraday or delivery)")]
    UnknownMode(String),

    /// Custom change outside (-100%, +100%) would project a non-positive exit price.
    #[error("custom target must lie strictly between -100% and +100%")]
    ChangeOutOfRange,

    #[error("{0} exceeds the supported maximum")]
    AmountTooLarge(&'static str),

    /// Below a configured `input` floor.
    #[error("{field} must be at least {min}")]
    BelowFloor { field: &'static str, min: Decimal },
}

/// Invalid rate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rate {name} must not be negative")]
    NegativeRate { name: &'static str },

    #[error("intraday_margin_multiplier must be between 1 and 100")]
    MarginMultiplierOutOfRange,

    #[error("gst_rate must not exceed 1 (100%)")]
    GstRateAboveOne,
}
