//! Render results as a terminal report, a preset ladder, or JSON.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::engine::FeeEngine;
use crate::types::{PriceLevel, Summary, TargetPreset, TradeRequest, TradeResult};
use crate::utils::{fmt_money, fmt_pct};

#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub preset: TargetPreset,
    pub label: &'static str,
    pub exit_price: Decimal,
    pub gross_pnl: Decimal,
    pub total_charges: Decimal,
    pub net_pnl: Decimal,
}

/// Everything the front end shows for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub request: TradeRequest,
    pub result: TradeResult,
    pub summary: Summary,
    pub levels: Vec<PriceLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sweep: Vec<SweepRow>,
}

impl Report {
    pub fn build(engine: &FeeEngine, req: &TradeRequest, with_sweep: bool) -> Self {
        let result = engine.compute(req);
        let sweep = if with_sweep {
            engine
                .sweep(req)
                .into_iter()
                .map(|(p, r)| SweepRow {
                    preset: p,
                    label: p.label(),
                    exit_price: r.exit_price,
                    gross_pnl: r.gross_pnl,
                    total_charges: r.total_charges,
                    net_pnl: r.net_pnl,
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            request: *req,
            summary: result.summary(),
            levels: engine.levels(req),
            result,
            sweep,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;

        writeln!(f, "Trade             : {} / {}", r.side, r.mode)?;
        writeln!(
            f,
            "Capital           : {} (effective {})",
            fmt_money(r.capital),
            fmt_money(r.effective_capital)
        )?;
        writeln!(f, "Entry price       : {}", fmt_money(r.entry_price))?;
        writeln!(
            f,
            "Target            : {} -> exit {}",
            self.request.target().label(),
            fmt_money(r.exit_price)
        )?;
        writeln!(f, "Quantity          : {} shares", r.quantity)?;
        if !r.is_affordable() {
            writeln!(f, "                    cannot afford one share at this entry price")?;
        }

        writeln!(f)?;
        writeln!(f, "Charges")?;
        for (kind, amount) in r.charges.entries() {
            writeln!(f, "  {:<20}{:>14}", kind.label(), fmt_money(amount))?;
        }
        writeln!(f, "  {:<20}{:>14}", "Total charges", fmt_money(r.total_charges))?;

        writeln!(f)?;
        writeln!(f, "Gross P&L         : {}", fmt_money(r.gross_pnl))?;
        writeln!(f, "Net P&L           : {}", fmt_money(r.net_pnl))?;
        let roc = self
            .summary
            .return_on_capital_pct
            .map(fmt_pct)
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(f, "Return on capital : {}", roc)?;

        writeln!(f)?;
        writeln!(f, "Trade levels")?;
        for level in &self.levels {
            writeln!(f, "  {:<20}{:>14}", level.label, fmt_money(level.price))?;
        }

        if !self.sweep.is_empty() {
            writeln!(f)?;
            write!(f, "{}", SweepTable(&self.sweep))?;
        }
        Ok(())
    }
}

/// Preset ladder as a fixed-width table.
pub struct SweepTable<'a>(pub &'a [SweepRow]);

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {:<20}{:>14}{:>14}{:>14}{:>14}",
            "Level", "Exit", "Gross", "Charges", "Net"
        )?;
        for row in self.0 {
            writeln!(
                f,
                "  {:<20}{:>14}{:>14}{:>14}{:>14}",
                row.label,
                fmt_money(row.exit_price),
                fmt_money(row.gross_pnl),
                fmt_money(row.total_charges),
                fmt_money(row.net_pnl)
            )?;
        }
        Ok(())
    }
}

pub fn render_sweep(rows: &[SweepRow]) -> String {
    SweepTable(rows).to_string()
}
