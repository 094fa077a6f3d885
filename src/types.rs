//! Core domain types: trade requests, target selections and derived results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ValidationError;
use crate::parser::parse_target;

/// Upper bound for capital and entry price. Keeps every product in the
/// pipeline well inside `Decimal` range.
/// 10^15 = 0x3_8D7E_A4C6_8000: lo word 0xA4C6_8000, mid word 0x3_8D7E.
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x3_8D7E, 0, false, 0);

/// Smallest accepted entry price. Bounds quantity to fit in a `u64`.
const MIN_TICK: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "b" | "long" => Ok(Side::Buy),
            "sell" | "s" | "short" => Ok(Side::Sell),
            _ => Err(ValidationError::UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("Buy"),
            Side::Sell => f.write_str("Sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Intraday,
    EquityDelivery,
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "intraday" | "mis" => Ok(Mode::Intraday),
            "delivery" | "equitydelivery" | "equity" | "cnc" => Ok(Mode::EquityDelivery),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Intraday => f.write_str("Intraday"),
            Mode::EquityDelivery => f.write_str("Equity Delivery"),
        }
    }
}

/// Fixed target / stop-loss levels offered by the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetPreset {
    Target1,
    Target2,
    Target3,
    TightStop,
    StopLoss,
}

impl TargetPreset {
    /// Ladder order: targets first, then stops from tightest to widest.
    pub const ALL: [TargetPreset; 5] = [
        TargetPreset::Target1,
        TargetPreset::Target2,
        TargetPreset::Target3,
        TargetPreset::TightStop,
        TargetPreset::StopLoss,
    ];

    /// Signed percentage move, e.g. `3` for +3%, `-1.5` for the stop-loss.
    pub fn percent(self) -> Decimal {
        match self {
            TargetPreset::Target1 => Decimal::new(1, 0),
            TargetPreset::Target2 => Decimal::new(3, 0),
            TargetPreset::Target3 => Decimal::new(5, 0),
            TargetPreset::TightStop => Decimal::new(-1, 0),
            TargetPreset::StopLoss => Decimal::new(-15, 1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetPreset::Target1 => "Target 1 (+1%)",
            TargetPreset::Target2 => "Target 2 (+3%)",
            TargetPreset::Target3 => "Target 3 (+5%)",
            TargetPreset::TightStop => "Stop-Loss (-1%)",
            TargetPreset::StopLoss => "Stop-Loss (-1.5%)",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetSelection {
    Preset(TargetPreset),
    /// Arbitrary signed percentage (e.g. `-2.5` for a 2.5% stop).
    Custom(Decimal),
}

impl TargetSelection {
    pub fn percent(&self) -> Decimal {
        match self {
            TargetSelection::Preset(p) => p.percent(),
            TargetSelection::Custom(pct) => *pct,
        }
    }

    /// Signed fractional move: 0.01 for +1%, -0.015 for -1.5%.
    pub fn change_fraction(&self) -> Decimal {
        self.percent() / Decimal::ONE_HUNDRED
    }

    pub fn label(&self) -> String {
        match self {
            TargetSelection::Preset(p) => p.label().to_string(),
            TargetSelection::Custom(pct) => {
                let sign = if pct.is_sign_negative() { "" } else { "+" };
                format!("Custom ({}{}%)", sign, pct.normalize())
            }
        }
    }
}

/// Validated trade input. Only constructible through [`TradeRequest::new`],
/// so a value of this type always satisfies `capital > 0` and `entry_price > 0`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TradeRequest {
    side: Side,
    mode: Mode,
    capital: Decimal,
    entry_price: Decimal,
    target: TargetSelection,
}

impl TradeRequest {
    pub fn new(
        side: Side,
        mode: Mode,
        capital: Decimal,
        entry_price: Decimal,
        target: TargetSelection,
    ) -> Result<Self, ValidationError> {
        if capital <= Decimal::ZERO {
            return Err(ValidationError::CapitalNotPositive);
        }
        if entry_price <= Decimal::ZERO {
            return Err(ValidationError::EntryPriceNotPositive);
        }
        if entry_price < MIN_TICK {
            return Err(ValidationError::EntryPriceBelowTick);
        }
        if capital > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge("capital"));
        }
        if entry_price > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge("entry price"));
        }
        if let TargetSelection::Custom(pct) = target {
            if pct <= -Decimal::ONE_HUNDRED || pct >= Decimal::ONE_HUNDRED {
                return Err(ValidationError::ChangeOutOfRange);
            }
        }
        Ok(Self {
            side,
            mode,
            capital,
            entry_price,
            target,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn capital(&self) -> Decimal {
        self.capital
    }

    pub fn entry_price(&self) -> Decimal {
        self.entry_price
    }

    pub fn target(&self) -> TargetSelection {
        self.target
    }

    /// Same trade aimed at a preset level. Presets are always in range.
    pub fn with_preset(&self, preset: TargetPreset) -> Self {
        Self {
            target: TargetSelection::Preset(preset),
            ..*self
        }
    }
}

/// Unvalidated input as it arrives from a form or a JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTradeInput {
    pub side: String,
    pub mode: String,
    pub capital: Decimal,
    pub entry_price: Decimal,
    pub target: String,
}

impl RawTradeInput {
    pub fn validate(&self) -> Result<TradeRequest, ValidationError> {
        TradeRequest::new(
            self.side.parse()?,
            self.mode.parse()?,
            self.capital,
            self.entry_price,
            parse_target(&self.target)?,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeKind {
    BrokerageBuy,
    BrokerageSell,
    Stt,
    StampDuty,
    Exchange,
    Sebi,
    Ipft,
    Gst,
    Dp,
}

impl ChargeKind {
    pub fn label(self) -> &'static str {
        match self {
            ChargeKind::BrokerageBuy => "Brokerage (buy)",
            ChargeKind::BrokerageSell => "Brokerage (sell)",
            ChargeKind::Stt => "STT",
            ChargeKind::StampDuty => "Stamp duty",
            ChargeKind::Exchange => "Exchange charge",
            ChargeKind::Sebi => "SEBI charge",
            ChargeKind::Ipft => "IPFT charge",
            ChargeKind::Gst => "GST",
            ChargeKind::Dp => "DP charge",
        }
    }
}

/// Itemized charges. Field order is the display order.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ChargeBreakdown {
    pub brokerage_buy: Decimal,
    pub brokerage_sell: Decimal,
    pub stt: Decimal,
    pub stamp_duty: Decimal,
    pub exchange: Decimal,
    pub sebi: Decimal,
    pub ipft: Decimal,
    pub gst: Decimal,
    pub dp: Decimal,
}

impl ChargeBreakdown {
    pub fn entries(&self) -> [(ChargeKind, Decimal); 9] {
        [
            (ChargeKind::BrokerageBuy, self.brokerage_buy),
            (ChargeKind::BrokerageSell, self.brokerage_sell),
            (ChargeKind::Stt, self.stt),
            (ChargeKind::StampDuty, self.stamp_duty),
            (ChargeKind::Exchange, self.exchange),
            (ChargeKind::Sebi, self.sebi),
            (ChargeKind::Ipft, self.ipft),
            (ChargeKind::Gst, self.gst),
            (ChargeKind::Dp, self.dp),
        ]
    }

    pub fn total(&self) -> Decimal {
        self.entries().iter().map(|(_, amount)| *amount).sum()
    }
}

/// Fully derived outcome of one computation. Amounts carry full precision;
/// rounding happens only when rendering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TradeResult {
    pub side: Side,
    pub mode: Mode,
    pub capital: Decimal,
    pub entry_price: Decimal,
    pub change_fraction: Decimal,
    pub effective_capital: Decimal,
    pub quantity: u64,
    pub exit_price: Decimal,
    pub buy_value: Decimal,
    pub sell_value: Decimal,
    pub gross_pnl: Decimal,
    pub charges: ChargeBreakdown,
    pub total_charges: Decimal,
    pub net_pnl: Decimal,
}

impl TradeResult {
    /// False when not even one share fits the effective capital.
    pub fn is_affordable(&self) -> bool {
        self.quantity > 0
    }

    /// `net_pnl / capital * 100`, `None` when capital is zero.
    pub fn return_on_capital_pct(&self) -> Option<Decimal> {
        self.net_pnl
            .checked_div(self.capital)
            .map(|r| r * Decimal::ONE_HUNDRED)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            quantity: self.quantity,
            net_pnl: self.net_pnl,
            return_on_capital_pct: self.return_on_capital_pct(),
            profitable_after_charges: self.net_pnl > Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub quantity: u64,
    pub net_pnl: Decimal,
    pub return_on_capital_pct: Option<Decimal>,
    pub profitable_after_charges: bool,
}

/// One point on the price ladder (chart x-axis category + y value).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceLevel {
    pub label: String,
    pub price: Decimal,
}
