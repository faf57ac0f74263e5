//! Stateless per-bar decision rules mapping numeric comparisons to
//! categorical signals.
//!
//! Every rule is a pure function of the scalars it is given; tracking the
//! one-bar-lagged "previous" values is the caller's responsibility. The
//! `is_reversed` flag swaps buy/sell polarity via [`Signal::reversed`].

use num_traits::Zero;
use rust_decimal::Decimal;
use signalis_core::Signal;

fn oriented(signal: Signal, is_reversed: bool) -> Signal {
    if is_reversed {
        signal.reversed()
    } else {
        signal
    }
}

/// Baseline slope rule: strong signals when the slope confirms its own
/// direction against the previous bar, plain signals otherwise.
#[must_use]
pub fn compare(cur_slope: Decimal, prev_slope: Decimal, is_reversed: bool) -> Signal {
    let signal = if cur_slope > Decimal::zero() && cur_slope > prev_slope {
        Signal::StrongBuy
    } else if cur_slope < Decimal::zero() && cur_slope < prev_slope {
        Signal::StrongSell
    } else if cur_slope > Decimal::zero() {
        Signal::Buy
    } else if cur_slope < Decimal::zero() {
        Signal::Sell
    } else {
        Signal::None
    };
    oriented(signal, is_reversed)
}

/// RSI rule: the slope rule first, then threshold crossings out of the
/// oversold/overbought zones.
#[must_use]
pub fn rsi(
    cur_slope: Decimal,
    prev_slope: Decimal,
    cur_rsi: Decimal,
    prev_rsi: Decimal,
    overbought: Decimal,
    oversold: Decimal,
    is_reversed: bool,
) -> Signal {
    let crossed_up = prev_rsi <= oversold && cur_rsi > oversold;
    let crossed_down = prev_rsi >= overbought && cur_rsi < overbought;
    let signal = if cur_slope > Decimal::zero() && cur_slope > prev_slope {
        Signal::StrongBuy
    } else if cur_slope < Decimal::zero() && cur_slope < prev_slope {
        Signal::StrongSell
    } else if cur_slope > Decimal::zero() || crossed_up {
        Signal::Buy
    } else if cur_slope < Decimal::zero() || crossed_down {
        Signal::Sell
    } else {
        Signal::None
    };
    oriented(signal, is_reversed)
}

/// Bollinger rule: the slope rule first, then price crossings back through
/// the lower/upper bands.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn bollinger_bands(
    cur_slope: Decimal,
    prev_slope: Decimal,
    cur_value: Decimal,
    prev_value: Decimal,
    upper: Decimal,
    prev_upper: Decimal,
    lower: Decimal,
    prev_lower: Decimal,
    is_reversed: bool,
) -> Signal {
    let crossed_up = prev_value <= prev_lower && cur_value > lower;
    let crossed_down = prev_value >= prev_upper && cur_value < upper;
    let signal = if cur_slope > Decimal::zero() && cur_slope > prev_slope {
        Signal::StrongBuy
    } else if cur_slope < Decimal::zero() && cur_slope < prev_slope {
        Signal::StrongSell
    } else if cur_slope > Decimal::zero() || crossed_up {
        Signal::Buy
    } else if cur_slope < Decimal::zero() || crossed_down {
        Signal::Sell
    } else {
        Signal::None
    };
    oriented(signal, is_reversed)
}

/// Volatility rule: no signal at all below the threshold; the slope rule
/// once volatility gates open.
#[must_use]
pub fn volatility(
    cur_slope: Decimal,
    prev_slope: Decimal,
    cur_volatility: Decimal,
    threshold: Decimal,
    is_reversed: bool,
) -> Signal {
    if cur_volatility < threshold {
        return Signal::None;
    }
    compare(cur_slope, prev_slope, is_reversed)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn compare_decision_table() {
        assert_eq!(compare(dec("1"), dec("0.5"), false), Signal::StrongBuy);
        assert_eq!(compare(dec("1"), dec("2"), false), Signal::Buy);
        assert_eq!(compare(dec("-1"), dec("-0.5"), false), Signal::StrongSell);
        assert_eq!(compare(dec("-1"), dec("-2"), false), Signal::Sell);
        assert_eq!(compare(dec("0"), dec("1"), false), Signal::None);
    }

    #[test]
    fn compare_honors_reversal() {
        assert_eq!(compare(dec("1"), dec("0.5"), true), Signal::StrongSell);
        assert_eq!(compare(dec("-1"), dec("-2"), true), Signal::Buy);
        assert_eq!(compare(dec("0"), dec("0"), true), Signal::None);
    }

    #[test]
    fn rsi_oversold_exit_buys_without_positive_slope() {
        let signal = rsi(
            dec("0"),
            dec("0"),
            dec("35"),
            dec("25"),
            dec("70"),
            dec("30"),
            false,
        );
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn rsi_overbought_exit_sells_without_negative_slope() {
        let signal = rsi(
            dec("0"),
            dec("0"),
            dec("65"),
            dec("75"),
            dec("70"),
            dec("30"),
            false,
        );
        assert_eq!(signal, Signal::Sell);
    }

    #[test]
    fn rsi_strong_slope_takes_precedence_over_crossings() {
        let signal = rsi(
            dec("-2"),
            dec("-1"),
            dec("35"),
            dec("25"),
            dec("70"),
            dec("30"),
            false,
        );
        assert_eq!(signal, Signal::StrongSell);
    }

    #[test]
    fn bollinger_lower_band_recross_buys() {
        let signal = bollinger_bands(
            dec("0"),
            dec("0"),
            dec("10.2"),
            dec("9.8"),
            dec("12"),
            dec("12"),
            dec("10"),
            dec("10"),
            false,
        );
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn bollinger_upper_band_recross_sells() {
        let signal = bollinger_bands(
            dec("0"),
            dec("0"),
            dec("11.8"),
            dec("12.2"),
            dec("12"),
            dec("12"),
            dec("10"),
            dec("10"),
            false,
        );
        assert_eq!(signal, Signal::Sell);
    }

    #[test]
    fn volatility_gates_everything_below_threshold() {
        assert_eq!(
            volatility(dec("5"), dec("1"), dec("0.1"), dec("0.5"), false),
            Signal::None
        );
        assert_eq!(
            volatility(dec("5"), dec("1"), dec("0.6"), dec("0.5"), false),
            Signal::StrongBuy
        );
    }
}
