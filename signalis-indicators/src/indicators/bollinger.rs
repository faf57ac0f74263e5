//! Bollinger Bands.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signalis_core::round4;

use crate::classify;
use crate::indicators::volatility::{std_dev_volatility, VolatilityParams};
use crate::ma::{self, MaKind};
use crate::output::IndicatorOutput;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::{fit_len, prev_at, value_at};

/// Parameters for [`bollinger_bands`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerBandsParams {
    /// Look-back window for the middle band and the deviation.
    pub length: usize,
    /// Width of the bands in standard deviations.
    pub std_dev_mult: Decimal,
    /// Moving average kind for the middle band.
    pub ma_kind: MaKind,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            length: 20,
            std_dev_mult: Decimal::TWO,
            ma_kind: MaKind::Simple,
        }
    }
}

/// Middle band plus upper/lower bands offset by a standard deviation
/// multiple.
///
/// Produces three named series and deliberately no canonical scalar:
/// chaining another indicator straight off this result is the documented
/// hard error, because no single series represents "the" output.
#[must_use]
pub fn bollinger_bands(
    series: &PriceSeries,
    input: &Input,
    params: &BollingerBandsParams,
) -> IndicatorOutput {
    let resolved = resolve(series, input);
    let count = series.count();

    let middle = fit_len(
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
    let deviation = std_dev_volatility(
        series,
        input,
        &VolatilityParams {
            length: params.length,
            ma_kind: params.ma_kind,
        },
    );

    let mut upper = Vec::with_capacity(count);
    let mut lower = Vec::with_capacity(count);
    for i in 0..count {
        let offset = params.std_dev_mult * value_at(&deviation.scalar, i);
        upper.push(round4(middle[i] + offset));
        lower.push(round4(middle[i] - offset));
    }

    let mut signals = Vec::with_capacity(count);
    for i in 0..count {
        let value = value_at(&resolved.values, i);
        let prev_value = prev_at(&resolved.values, i);
        signals.push(classify::bollinger_bands(
            value - middle[i],
            prev_value - prev_at(&middle, i),
            value,
            prev_value,
            value_at(&upper, i),
            prev_at(&upper, i),
            value_at(&lower, i),
            prev_at(&lower, i),
            false,
        ));
    }

    let mut outputs = HashMap::new();
    outputs.insert("UpperBand".to_string(), upper);
    outputs.insert("MiddleBand".to_string(), middle);
    outputs.insert("LowerBand".to_string(), lower);
    IndicatorOutput {
        indicator: "BollingerBands".to_string(),
        scalar: Vec::new(),
        outputs,
        signals,
    }
}
