//! Moving Average Convergence Divergence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use signalis_core::round4;

use crate::classify;
use crate::ma::{self, MaKind};
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{fit_len, prev_at, value_at};

/// Parameters for [`macd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// Fast moving average length.
    pub fast_length: usize,
    /// Slow moving average length.
    pub slow_length: usize,
    /// Signal-line moving average length.
    pub signal_length: usize,
    /// Moving average kind used for all three smoothing stages.
    pub ma_kind: MaKind,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_length: 12,
            slow_length: 26,
            signal_length: 9,
            ma_kind: MaKind::Exponential,
        }
    }
}

/// MACD line, signal line and histogram.
///
/// Signals come from the histogram compared against its previous value
/// only; the canonical scalar is the MACD line.
#[must_use]
pub fn macd(series: &PriceSeries, input: &Input, params: &MacdParams) -> IndicatorOutput {
    let resolved = resolve(series, input);
    let count = series.count();

    let fast = ma::compute_lenient(
        params.ma_kind,
        &resolved.values,
        &resolved.volumes,
        params.fast_length,
        None,
        None,
    );
    let slow = ma::compute_lenient(
        params.ma_kind,
        &resolved.values,
        &resolved.volumes,
        params.slow_length,
        None,
        None,
    );

    let mut line = Vec::with_capacity(count);
    for i in 0..count {
        line.push(round4(value_at(&fast, i) - value_at(&slow, i)));
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
        signals.push(classify::compare(
            value_at(&histogram, i),
            prev_at(&histogram, i),
            false,
        ));
    }

    let mut outputs = HashMap::new();
    outputs.insert("Macd".to_string(), line.clone());
    outputs.insert("Signal".to_string(), signal_line);
    outputs.insert("Histogram".to_string(), histogram);
    IndicatorOutput {
        indicator: "Macd".to_string(),
        scalar: line,
        outputs,
        signals,
    }
}
