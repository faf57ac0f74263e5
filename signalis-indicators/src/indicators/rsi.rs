//! Relative Strength Index.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signalis_core::round4;

use crate::classify;
use crate::ma::{self, MaKind};
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{fit_len, prev_at, value_at};

/// Parameters for [`rsi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    /// Smoothing length for the average gain/loss.
    pub length: usize,
    /// Length of the signal-line moving average over the RSI.
    pub signal_length: usize,
    /// Moving average kind used for both smoothing stages.
    pub ma_kind: MaKind,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            length: 14,
            signal_length: 3,
            ma_kind: MaKind::Wilder,
        }
    }
}

const OVERBOUGHT: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
const OVERSOLD: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// RSI oscillator scaled to `[0, 100]`, with a signal line and histogram.
///
/// The per-bar gain/loss split treats missing history as zero, so the first
/// bar's whole value counts as gain. An all-zero average loss pins the RSI
/// at 100; a zero average gain against real losses pins it at 0. Signals
/// follow the RSI classifier rule with fixed 70/30 thresholds over the
/// histogram slope.
#[must_use]
pub fn rsi(series: &PriceSeries, input: &Input, params: &RsiParams) -> IndicatorOutput {
    let resolved = resolve(series, input);
    let count = series.count();

    let mut gains = Vec::with_capacity(count);
    let mut losses = Vec::with_capacity(count);
    for i in 0..count {
        let delta = value_at(&resolved.values, i) - prev_at(&resolved.values, i);
        gains.push(round4(delta.max(Decimal::ZERO)));
        losses.push(round4((-delta).max(Decimal::ZERO)));
    }

    let avg_gain = ma::compute_lenient(
        params.ma_kind,
        &gains,
        &resolved.volumes,
        params.length,
        None,
        None,
    );
    let avg_loss = ma::compute_lenient(
        params.ma_kind,
        &losses,
        &resolved.volumes,
        params.length,
        None,
        None,
    );

    let mut line = Vec::with_capacity(count);
    for i in 0..count {
        let gain = value_at(&avg_gain, i);
        let loss = value_at(&avg_loss, i);
        let value = if loss.is_zero() {
            Decimal::ONE_HUNDRED
        } else if gain.is_zero() {
            Decimal::ZERO
        } else {
            let rs = (gain / loss).clamp(Decimal::ZERO, Decimal::ONE);
            (Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (Decimal::ONE + rs))
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        };
        line.push(round4(value));
    }

    let signal_line = fit_len(
        ma::compute_lenient(
            params.ma_kind,
            &line,
            &resolved.volumes,
            params.signal_length,
            None,
            None,
        ),
        count,
    );
    let mut histogram = Vec::with_capacity(count);
    for i in 0..count {
        histogram.push(round4(value_at(&line, i) - value_at(&signal_line, i)));
    }

    let mut signals = Vec::with_capacity(count);
    for i in 0..count {
        signals.push(classify::rsi(
            value_at(&histogram, i),
            prev_at(&histogram, i),
            value_at(&line, i),
            prev_at(&line, i),
            OVERBOUGHT,
            OVERSOLD,
            false,
        ));
    }

    let mut outputs = HashMap::new();
    outputs.insert("Rsi".to_string(), line.clone());
    outputs.insert("Signal".to_string(), signal_line);
    outputs.insert("Histogram".to_string(), histogram);
    IndicatorOutput {
        indicator: "Rsi".to_string(),
        scalar: line,
        outputs,
        signals,
    }
}
