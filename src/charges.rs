//! Regulatory and broker charge rules per trading mode.
//!
//! | Charge    | Intraday                       | Equity delivery            |
//! |-----------|--------------------------------|----------------------------|
//! | Brokerage | flat or capped, per leg        | 0                          |
//! | STT       | sell leg                       | both legs                  |
//! | Stamp     | buy leg                        | buy leg                    |
//! | Exchange  | both legs                      | both legs                  |
//! | SEBI      | both legs                      | both legs                  |
//! | IPFT      | both legs                      | both legs                  |
//! | GST       | on brokerage + exchange        | on brokerage + exchange    |
//! | DP        | never                          | once, per [`DpTrigger`]    |

use rust_decimal::Decimal;

use crate::config::{BrokeragePolicy, DpTrigger, RateTable};
use crate::types::{ChargeBreakdown, Mode, Side};

/// Traded value of each leg of a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legs {
    pub buy_value: Decimal,
    pub sell_value: Decimal,
}

impl Legs {
    pub fn turnover(&self) -> Decimal {
        self.buy_value + self.sell_value
    }
}

pub fn compute_charges(rates: &RateTable, mode: Mode, legs: Legs, dp_due: bool) -> ChargeBreakdown {
    let turnover = legs.turnover();

    let (brokerage_buy, brokerage_sell, stt, stamp_duty, dp) = match mode {
        Mode::Intraday => (
            brokerage_for_leg(rates, legs.buy_value),
            brokerage_for_leg(rates, legs.sell_value),
            rates.stt_intra_rate * legs.sell_value,
            rates.stamp_intra_rate * legs.buy_value,
            Decimal::ZERO,
        ),
        Mode::EquityDelivery => (
            Decimal::ZERO,
            Decimal::ZERO,
            rates.stt_equity_rate * turnover,
            rates.stamp_equity_rate * legs.buy_value,
            if dp_due { rates.dp_charge } else { Decimal::ZERO },
        ),
    };

    let exchange = rates.exchange_rate * turnover;
    let sebi = rates.sebi_rate * turnover;
    let ipft = rates.ipft_rate * turnover;
    let gst = rates.gst_rate * (brokerage_buy + brokerage_sell + exchange);

    ChargeBreakdown {
        brokerage_buy,
        brokerage_sell,
        stt,
        stamp_duty,
        exchange,
        sebi,
        ipft,
        gst,
        dp,
    }
}

/// Intraday brokerage for one order.
pub fn brokerage_for_leg(rates: &RateTable, leg_value: Decimal) -> Decimal {
    match rates.brokerage_policy {
        BrokeragePolicy::Flat => rates.fixed_brokerage,
        BrokeragePolicy::Capped => rates.fixed_brokerage.min(rates.brokerage_cap_rate * leg_value),
    }
}

/// Whether the delivery DP charge fires. Zero quantity means no sell leg executed.
pub fn dp_applies(
    trigger: DpTrigger,
    side: Side,
    quantity: u64,
    entry_price: Decimal,
    exit_price: Decimal,
) -> bool {
    if quantity == 0 {
        return false;
    }
    match trigger {
        DpTrigger::SellLeg => true,
        DpTrigger::ShortOnly => side == Side::Sell,
        DpTrigger::SellOrLoss => side == Side::Sell || exit_price < entry_price,
    }
}
