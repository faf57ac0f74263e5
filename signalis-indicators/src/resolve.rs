use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signalis_core::round4;

use crate::series::PriceSeries;
use crate::util::fit_len;

/// The series an indicator computes over.
///
/// `Close` is the canonical choice for a fresh series; `Series` carries an
/// explicit sequence, typically a previous computation's scalar obtained
/// through [`crate::IndicatorOutput::as_input`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Closing prices of the underlying series.
    #[default]
    Close,
    /// An explicit caller-supplied series.
    Series(Vec<Decimal>),
}

/// Input resolution result: the scalar values plus the correlated bound
/// and auxiliary columns formulas read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The scalar input series, fitted to the bar count.
    pub values: Vec<Decimal>,
    /// High bounds, synthesized when the input is not a plain price series.
    pub highs: Vec<Decimal>,
    /// Low bounds, synthesized when the input is not a plain price series.
    pub lows: Vec<Decimal>,
    /// Opening prices.
    pub opens: Vec<Decimal>,
    /// Traded volumes.
    pub volumes: Vec<Decimal>,
}

/// Resolves the input series and its high/low bounds for one computation.
///
/// When the chosen values are the volume column, or their sum falls outside
/// the band spanned by the series' own lows and highs, the input is a
/// derived series (an oscillator, a smoothed line) for which the raw bounds
/// no longer apply. Plausible bounds are then synthesized as the rolling
/// maximum/minimum of the values over a two-bar window, expanding at the
/// head. This is what lets indicators be computed "of" other indicators.
#[must_use]
pub fn resolve(series: &PriceSeries, input: &Input) -> Resolved {
    let count = series.count();
    let values = match input {
        Input::Close => series.closes().to_vec(),
        Input::Series(values) => values.clone(),
    };
    let values = fit_len(values, count);

    let sum: Decimal = values.iter().copied().sum();
    let low_sum: Decimal = series.lows().iter().copied().sum();
    let high_sum: Decimal = series.highs().iter().copied().sum();
    let derived =
        values.as_slice() == series.volumes() || sum < low_sum || sum > high_sum;

    let (highs, lows) = if derived {
        synthesize_bounds(&values)
    } else {
        (
            fit_len(series.highs().to_vec(), count),
            fit_len(series.lows().to_vec(), count),
        )
    };

    Resolved {
        values,
        highs,
        lows,
        opens: fit_len(series.opens().to_vec(), count),
        volumes: fit_len(series.volumes().to_vec(), count),
    }
}

/// Rolling two-bar maximum/minimum, expanding before index two.
fn synthesize_bounds(values: &[Decimal]) -> (Vec<Decimal>, Vec<Decimal>) {
    let mut highs = Vec::with_capacity(values.len());
    let mut lows = Vec::with_capacity(values.len());
    for (i, &value) in values.iter().enumerate() {
        let prev = if i == 0 { value } else { values[i - 1] };
        highs.push(round4(value.max(prev)));
        lows.push(round4(value.min(prev)));
    }
    (highs, lows)
}
