//! Small helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Two decimals, half away from zero (101.005 -> 101.01).
pub fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// "₹1234.50" / "-₹750.00"
pub fn fmt_money(d: Decimal) -> String {
    let r = round_money(d);
    if r.is_sign_negative() && !r.is_zero() {
        format!("-₹{:.2}", r.abs())
    } else {
        format!("₹{:.2}", r.abs())
    }
}

pub fn fmt_pct(d: Decimal) -> String {
    let r = round_money(d);
    // avoid "-0.00%"
    let r = if r.is_zero() { Decimal::ZERO } else { r };
    format!("{:.2}%", r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(101.005)), dec!(101.01));
        assert_eq!(round_money(dec!(-101.005)), dec!(-101.01));
        assert_eq!(round_money(dec!(7.737273)), dec!(7.74));
    }

    #[test]
    fn money_formatting() {
        assert_eq!(fmt_money(dec!(101)), "₹101.00");
        assert_eq!(fmt_money(dec!(-750)), "-₹750.00");
        assert_eq!(fmt_money(dec!(0.004)), "₹0.00");
        assert_eq!(fmt_money(dec!(-0.004)), "₹0.00");
    }

    #[test]
    fn pct_formatting() {
        assert_eq!(fmt_pct(dec!(4.528)), "4.53%");
        assert_eq!(fmt_pct(dec!(-0.5)), "-0.50%");
        assert_eq!(fmt_pct(dec!(-0.001)), "0.00%");
    }
}
