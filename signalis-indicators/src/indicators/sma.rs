//! Simple Moving Average.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify;
use crate::ma;
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{prev_at, value_at};

/// Parameters for [`sma`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaParams {
    /// Look-back window length.
    pub length: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Arithmetic mean over the available look-back window, expanding at the
/// series head so every bar gets a value.
///
/// Signals compare the input's distance from its mean against the previous
/// bar's distance.
#[must_use]
pub fn sma(series: &PriceSeries, input: &Input, params: &SmaParams) -> IndicatorOutput {
    let resolved = resolve(series, input);
    let line = ma::sma_series(&resolved.values, params.length);

    let mut signals = Vec::with_capacity(series.count());
    for i in 0..series.count() {
        let slope = value_at(&resolved.values, i) - value_at(&line, i);
        let prev_slope = prev_at(&resolved.values, i) - prev_at(&line, i);
        signals.push(classify::compare(slope, prev_slope, false));
    }

    let mut outputs = HashMap::new();
    outputs.insert("Sma".to_string(), line.clone());
    IndicatorOutput {
        indicator: "Sma".to_string(),
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

    fn vals(values: &[&str]) -> Vec<Decimal> {
        values.iter().map(|v| dec(v)).collect()
    }

    fn series(closes: &[&str]) -> PriceSeries {
        let closes = vals(closes);
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
    fn boundary_vector_averages_available_history() {
        let s = series(&[
            "10", "11", "12", "11", "10", "9", "10", "11", "12", "13", "14",
        ]);
        let out = sma(&s, &Input::Close, &SmaParams { length: 3 });
        assert_eq!(
            out.scalar,
            vals(&[
                "10", "10.5", "11", "11.3333", "11", "10", "9.6667", "10", "11", "12", "13",
            ])
        );
    }

    #[test]
    fn produces_one_signal_per_bar() {
        let s = series(&["10", "11", "12"]);
        let out = sma(&s, &Input::Close, &SmaParams::default());
        assert_eq!(out.signals.len(), 3);
        assert_eq!(out.output("Sma").unwrap().len(), 3);
        assert_eq!(out.indicator, "Sma");
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: SmaParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SmaParams::default());
    }
}
