//! Single-scalar price transforms.

use std::collections::HashMap;

use rust_decimal::Decimal;
use signalis_core::round4;

use crate::classify;
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{prev_at, value_at};

fn transform<F>(series: &PriceSeries, input: &Input, name: &str, f: F) -> IndicatorOutput
where
    F: Fn(Decimal, Decimal, Decimal) -> Decimal,
{
    let resolved = resolve(series, input);
    let count = series.count();

    let mut line = Vec::with_capacity(count);
    for i in 0..count {
        line.push(round4(f(
            value_at(&resolved.highs, i),
            value_at(&resolved.lows, i),
            value_at(&resolved.values, i),
        )));
    }

    let mut signals = Vec::with_capacity(count);
    for i in 0..count {
        let cur = value_at(&line, i);
        let prev = prev_at(&line, i);
        let prev2 = match i.checked_sub(2) {
            Some(j) => line[j],
            None => Decimal::ZERO,
        };
        signals.push(classify::compare(cur - prev, prev - prev2, false));
    }

    let mut outputs = HashMap::new();
    outputs.insert(name.to_string(), line.clone());
    IndicatorOutput {
        indicator: name.to_string(),
        scalar: line,
        outputs,
        signals,
    }
}

/// Midpoint of the bar range: `(high + low) / 2`.
#[must_use]
pub fn median_price(series: &PriceSeries, input: &Input) -> IndicatorOutput {
    transform(series, input, "MedianPrice", |high, low, _| {
        (high + low) / Decimal::TWO
    })
}

/// Average of range and close: `(high + low + close) / 3`.
#[must_use]
pub fn typical_price(series: &PriceSeries, input: &Input) -> IndicatorOutput {
    transform(series, input, "TypicalPrice", |high, low, value| {
        (high + low + value) / Decimal::from(3)
    })
}

/// Close-weighted bar price: `(high + low + 2 * close) / 4`.
#[must_use]
pub fn weighted_close(series: &PriceSeries, input: &Input) -> IndicatorOutput {
    transform(series, input, "WeightedClose", |high, low, value| {
        (high + low + Decimal::TWO * value) / Decimal::from(4)
    })
}
