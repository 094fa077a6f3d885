//! Position sizing, exit projection and P&L aggregation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::charges::{self, Legs};
use crate::config::RateTable;
use crate::error::ValidationError;
use crate::types::{
    Mode, PriceLevel, RawTradeInput, Side, TargetPreset, TargetSelection, TradeRequest,
    TradeResult,
};

/// Pure calculator over an immutable rate table. Cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct FeeEngine {
    rates: RateTable,
}

impl FeeEngine {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn margin_multiplier(&self, mode: Mode) -> Decimal {
        match mode {
            Mode::Intraday => self.rates.intraday_margin_multiplier,
            Mode::EquityDelivery => Decimal::ONE,
        }
    }

    pub fn compute(&self, req: &TradeRequest) -> TradeResult {
        let side = req.side();
        let mode = req.mode();
        let entry = req.entry_price();
        let change = req.target().change_fraction();

        let effective_capital = req.capital() * self.margin_multiplier(mode);
        let quantity = affordable_quantity(effective_capital, entry);
        let qty = Decimal::from(quantity);

        let exit_price = project_exit(side, entry, change);
        let gross_pnl = match side {
            Side::Buy => (exit_price - entry) * qty,
            Side::Sell => (entry - exit_price) * qty,
        };
        let legs = match side {
            Side::Buy => Legs {
                buy_value: entry * qty,
                sell_value: exit_price * qty,
            },
            Side::Sell => Legs {
                buy_value: exit_price * qty,
                sell_value: entry * qty,
            },
        };

        let dp_due = charges::dp_applies(self.rates.dp_trigger, side, quantity, entry, exit_price);
        let charges = charges::compute_charges(&self.rates, mode, legs, dp_due);
        let total_charges = charges.total();
        let net_pnl = gross_pnl - total_charges;

        if quantity == 0 {
            warn!(
                "entry {} exceeds effective capital {}: cannot afford one share",
                entry, effective_capital
            );
        }
        debug!(
            "{} {} qty={} entry={} exit={} gross={} charges={} net={}",
            side, mode, quantity, entry, exit_price, gross_pnl, total_charges, net_pnl
        );

        TradeResult {
            side,
            mode,
            capital: req.capital(),
            entry_price: entry,
            change_fraction: change,
            effective_capital,
            quantity,
            exit_price,
            buy_value: legs.buy_value,
            sell_value: legs.sell_value,
            gross_pnl,
            charges,
            total_charges,
            net_pnl,
        }
    }

    /// Validate raw form/JSON input, then compute.
    pub fn evaluate(&self, raw: &RawTradeInput) -> Result<TradeResult, ValidationError> {
        Ok(self.compute(&raw.validate()?))
    }

    /// Entry followed by every preset level, plus the custom level if one was
    /// chosen. This is the ordered x-axis of the price chart.
    pub fn levels(&self, req: &TradeRequest) -> Vec<PriceLevel> {
        let entry = req.entry_price();
        let mut levels = vec![PriceLevel {
            label: "Entry Price".to_string(),
            price: entry,
        }];
        levels.extend(TargetPreset::ALL.iter().map(|p| PriceLevel {
            label: p.label().to_string(),
            price: project_exit(req.side(), entry, TargetSelection::Preset(*p).change_fraction()),
        }));
        if let TargetSelection::Custom(_) = req.target() {
            levels.push(PriceLevel {
                label: req.target().label(),
                price: project_exit(req.side(), entry, req.target().change_fraction()),
            });
        }
        levels
    }

    /// Full result for every preset target on the same trade.
    pub fn sweep(&self, req: &TradeRequest) -> Vec<(TargetPreset, TradeResult)> {
        TargetPreset::ALL
            .iter()
            .map(|p| (*p, self.compute(&req.with_preset(*p))))
            .collect()
    }
}

/// `floor(effective_capital / entry)`, never over-allocating.
pub fn affordable_quantity(effective_capital: Decimal, entry: Decimal) -> u64 {
    let mut q = (effective_capital / entry).floor();
    // Division rounds at 28 significant digits; step back if that crossed an integer.
    if q * entry > effective_capital {
        q -= Decimal::ONE;
    }
    // Validation caps this at 1e17 / 0.01 = 1e19 shares, inside u64. Past
    // that, saturate instead of reporting zero.
    debug_assert!(q >= Decimal::ZERO, "negative quantity {q}");
    q.to_u64().unwrap_or(if q.is_sign_negative() { 0 } else { u64::MAX })
}

/// Buy profits on a rise, sell on a fall.
pub fn project_exit(side: Side, entry: Decimal, change: Decimal) -> Decimal {
    match side {
        Side::Buy => entry * (Decimal::ONE + change),
        Side::Sell => entry * (Decimal::ONE - change),
    }
}
