//! Standard deviation volatility.

use std::collections::HashMap;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use signalis_core::round4;

use crate::classify;
use crate::ma::{self, MaKind};
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{fit_len, prev_at, value_at};

/// Parameters for [`std_dev_volatility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityParams {
    /// Look-back window for the deviation mean and the variance.
    pub length: usize,
    /// Moving average kind the deviations are measured against.
    pub ma_kind: MaKind,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            length: 20,
            ma_kind: MaKind::Simple,
        }
    }
}

/// Rolling standard deviation of the input around its moving average,
/// with an EMA of the deviation as threshold line.
///
/// Directional signals only fire while the deviation is at or above its
/// EMA; quiet stretches classify as `None` regardless of slope.
#[must_use]
pub fn std_dev_volatility(
    series: &PriceSeries,
    input: &Input,
    params: &VolatilityParams,
) -> IndicatorOutput {
    let resolved = resolve(series, input);
    let count = series.count();

    let basis = fit_len(
        ma::compute_lenient(
            params.ma_kind,
            &resolved.values,
            &resolved.volumes,
            params.length,
            None,
            None,
        ),
        count,
    );

    let mut deviations = Vec::with_capacity(count);
    let mut squared = Vec::with_capacity(count);
    for i in 0..count {
        let deviation = round4(value_at(&resolved.values, i) - basis[i]);
        deviations.push(deviation);
        squared.push(round4(deviation * deviation));
    }

    let variance = ma::sma_series(&squared, params.length);
    let mut std_dev = Vec::with_capacity(count);
    for i in 0..count {
        let var = value_at(&variance, i);
        // A true mean of squares is never negative; guarded anyway.
        let dev = if var < Decimal::ZERO {
            Decimal::ZERO
        } else {
            var.sqrt().unwrap_or(Decimal::ZERO)
        };
        std_dev.push(round4(dev));
    }
    let std_dev_ema = ma::ema_series(&std_dev, params.length);

    let mut signals = Vec::with_capacity(count);
    for i in 0..count {
        signals.push(classify::volatility(
            value_at(&deviations, i),
            prev_at(&deviations, i),
            value_at(&std_dev, i),
            value_at(&std_dev_ema, i),
            false,
        ));
    }

    let mut outputs = HashMap::new();
    outputs.insert("StdDev".to_string(), std_dev.clone());
    outputs.insert("StdDevEma".to_string(), std_dev_ema);
    IndicatorOutput {
        indicator: "StdDevVolatility".to_string(),
        scalar: std_dev,
        outputs,
        signals,
    }
}
