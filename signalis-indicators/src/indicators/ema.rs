//! Exponential Moving Average.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify;
use crate::ma;
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{prev_at, value_at};

/// Parameters for [`ema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaParams {
    /// Smoothing length; the constant is `2 / (length + 1)` clamped to
    /// `[0.01, 0.99]`.
    pub length: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Exponential moving average seeded from zero, so the first bar carries
/// the cold-start bias `ema[0] = value[0] * k`.
#[must_use]
pub fn ema(series: &PriceSeries, input: &Input, params: &EmaParams) -> IndicatorOutput {
    let resolved = resolve(series, input);
    let line = ma::ema_series(&resolved.values, params.length);

    let mut signals = Vec::with_capacity(series.count());
    for i in 0..series.count() {
        let slope = value_at(&resolved.values, i) - value_at(&line, i);
        let prev_slope = prev_at(&resolved.values, i) - prev_at(&line, i);
        signals.push(classify::compare(slope, prev_slope, false));
    }

    let mut outputs = HashMap::new();
    outputs.insert("Ema".to_string(), line.clone());
    IndicatorOutput {
        indicator: "Ema".to_string(),
        scalar: line,
        outputs,
        signals,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn series(closes: &[&str]) -> PriceSeries {
        let closes: Vec<Decimal> = closes.iter().map(|v| dec(v)).collect();
        PriceSeries::from_columns(
            Vec::new(),
            closes.clone(),
            closes.iter().map(|c| c + Decimal::ONE).collect(),
            closes.iter().map(|c| c - Decimal::ONE).collect(),
            closes.clone(),
            vec![Decimal::from(100); closes.len()],
        )
    }

    #[test]
    fn cold_start_bias_on_first_bar() {
        let s = series(&["100"]);
        let out = ema(&s, &Input::Close, &EmaParams { length: 14 });
        // round(100 * 2/15, 4)
        assert_eq!(out.scalar, vec![dec("13.3333")]);
    }

    #[test]
    fn recurrence_uses_rounded_previous_value() {
        let s = series(&["1", "2"]);
        let out = ema(&s, &Input::Close, &EmaParams { length: 3 });
        assert_eq!(out.scalar, vec![dec("0.5"), dec("1.25")]);
    }

    #[test]
    fn length_invariant_holds() {
        let s = series(&["1", "2", "3", "4"]);
        let out = ema(&s, &Input::Close, &EmaParams::default());
        assert_eq!(out.scalar.len(), 4);
        assert_eq!(out.signals.len(), 4);
    }
}
