use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use signalis_core::{decimal_from_usize, round4};
use tracing::warn;

use crate::error::IndicatorError;
use crate::resolve::{resolve, Input};
use crate::series::PriceSeries;
use crate::util::value_at;

/// The closed set of moving average kinds usable wherever a smoothed
/// series is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaKind {
    /// Arithmetic mean over the look-back window.
    Simple,
    /// Exponentially weighted recurrence.
    Exponential,
    /// Wilder's smoothed moving average.
    Wilder,
    /// Linearly weighted mean, newest bar heaviest.
    Weighted,
    /// Double exponential moving average.
    DoubleExponential,
    /// Triple exponential moving average.
    TripleExponential,
    /// Doubly smoothed simple mean.
    Triangular,
    /// Hull moving average.
    Hull,
    /// Zero-lag exponential moving average.
    ZeroLagExponential,
    /// Volume weighted moving average.
    VolumeWeighted,
    /// Kaufman's adaptive moving average; honors the fast/slow lengths.
    KaufmanAdaptive,
    /// McGinley dynamic.
    McGinleyDynamic,
    /// Jurik moving average. Declared for catalogue compatibility; no
    /// algorithm is registered yet.
    Jurik,
    /// Arnaud Legoux moving average. No algorithm registered yet.
    ArnaudLegoux,
    /// Variable index dynamic average. No algorithm registered yet.
    VariableIndexDynamic,
    /// Fractal adaptive moving average. No algorithm registered yet.
    Fractal,
}

impl MaKind {
    /// Returns the snake_case name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MaKind::Simple => "simple",
            MaKind::Exponential => "exponential",
            MaKind::Wilder => "wilder",
            MaKind::Weighted => "weighted",
            MaKind::DoubleExponential => "double_exponential",
            MaKind::TripleExponential => "triple_exponential",
            MaKind::Triangular => "triangular",
            MaKind::Hull => "hull",
            MaKind::ZeroLagExponential => "zero_lag_exponential",
            MaKind::VolumeWeighted => "volume_weighted",
            MaKind::KaufmanAdaptive => "kaufman_adaptive",
            MaKind::McGinleyDynamic => "mcginley_dynamic",
            MaKind::Jurik => "jurik",
            MaKind::ArnaudLegoux => "arnaud_legoux",
            MaKind::VariableIndexDynamic => "variable_index_dynamic",
            MaKind::Fractal => "fractal",
        }
    }
}

impl std::fmt::Display for MaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a moving average kind name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseMaKindError;

impl std::fmt::Display for ParseMaKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid moving average kind")
    }
}

impl std::error::Error for ParseMaKindError {}

impl std::str::FromStr for MaKind {
    type Err = ParseMaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(MaKind::Simple),
            "exponential" => Ok(MaKind::Exponential),
            "wilder" => Ok(MaKind::Wilder),
            "weighted" => Ok(MaKind::Weighted),
            "double_exponential" => Ok(MaKind::DoubleExponential),
            "triple_exponential" => Ok(MaKind::TripleExponential),
            "triangular" => Ok(MaKind::Triangular),
            "hull" => Ok(MaKind::Hull),
            "zero_lag_exponential" => Ok(MaKind::ZeroLagExponential),
            "volume_weighted" => Ok(MaKind::VolumeWeighted),
            "kaufman_adaptive" => Ok(MaKind::KaufmanAdaptive),
            "mcginley_dynamic" => Ok(MaKind::McGinleyDynamic),
            "jurik" => Ok(MaKind::Jurik),
            "arnaud_legoux" => Ok(MaKind::ArnaudLegoux),
            "variable_index_dynamic" => Ok(MaKind::VariableIndexDynamic),
            "fractal" => Ok(MaKind::Fractal),
            _ => Err(ParseMaKindError),
        }
    }
}

/// What the dispatcher does with a kind that has no registered algorithm.
///
/// The legacy behavior is to log and return an empty series, which
/// downstream arithmetic treats as all zeroes; `Strict` surfaces the
/// explicit error instead and is the recommended choice for new callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Log a diagnostic and return an empty series.
    #[default]
    SilentEmpty,
    /// Return [`IndicatorError::UnsupportedMovingAverage`].
    Strict,
}

/// Dispatches a moving average computation over the resolved input.
///
/// # Errors
///
/// Returns [`IndicatorError::UnsupportedMovingAverage`] for an unregistered
/// kind under [`FallbackPolicy::Strict`]; never errors otherwise.
pub fn moving_average(
    series: &PriceSeries,
    input: &Input,
    kind: MaKind,
    length: usize,
    policy: FallbackPolicy,
) -> Result<Vec<Decimal>, IndicatorError> {
    moving_average_ext(series, input, kind, length, None, None, policy)
}

/// [`moving_average`] with explicit fast/slow lengths for the kinds that
/// take them.
///
/// The dispatcher passes through exactly what the caller supplied; each
/// algorithm applies its own fallback (slow defaults to `length`, fast to
/// the algorithm's classic constant) when a side is unset.
///
/// # Errors
///
/// Same as [`moving_average`].
pub fn moving_average_ext(
    series: &PriceSeries,
    input: &Input,
    kind: MaKind,
    length: usize,
    fast_length: Option<usize>,
    slow_length: Option<usize>,
    policy: FallbackPolicy,
) -> Result<Vec<Decimal>, IndicatorError> {
    let resolved = resolve(series, input);
    match dispatch(
        kind,
        &resolved.values,
        &resolved.volumes,
        length,
        fast_length,
        slow_length,
    ) {
        Some(smoothed) => Ok(smoothed),
        None => match policy {
            FallbackPolicy::SilentEmpty => {
                warn!(kind = %kind, "unsupported moving average kind, returning empty series");
                Ok(Vec::new())
            }
            FallbackPolicy::Strict => Err(IndicatorError::UnsupportedMovingAverage(kind)),
        },
    }
}

/// In-crate dispatch used by indicator functions, always under the legacy
/// silent-empty policy so that indicator calls never fail.
pub(crate) fn compute_lenient(
    kind: MaKind,
    values: &[Decimal],
    volumes: &[Decimal],
    length: usize,
    fast_length: Option<usize>,
    slow_length: Option<usize>,
) -> Vec<Decimal> {
    dispatch(kind, values, volumes, length, fast_length, slow_length).unwrap_or_else(|| {
        warn!(kind = %kind, "unsupported moving average kind, returning empty series");
        Vec::new()
    })
}

/// Pure lookup from kind to algorithm; `None` marks an unregistered kind.
fn dispatch(
    kind: MaKind,
    values: &[Decimal],
    volumes: &[Decimal],
    length: usize,
    fast_length: Option<usize>,
    slow_length: Option<usize>,
) -> Option<Vec<Decimal>> {
    match kind {
        MaKind::Simple => Some(sma_series(values, length)),
        MaKind::Exponential => Some(ema_series(values, length)),
        MaKind::Wilder => Some(wilder_series(values, length)),
        MaKind::Weighted => Some(wma_series(values, length)),
        MaKind::DoubleExponential => Some(dema_series(values, length)),
        MaKind::TripleExponential => Some(tema_series(values, length)),
        MaKind::Triangular => Some(tma_series(values, length)),
        MaKind::Hull => Some(hull_series(values, length)),
        MaKind::ZeroLagExponential => Some(zlema_series(values, length)),
        MaKind::VolumeWeighted => Some(vwma_series(values, volumes, length)),
        MaKind::KaufmanAdaptive => Some(kama_series(values, length, fast_length, slow_length)),
        MaKind::McGinleyDynamic => Some(mcginley_series(values, length)),
        MaKind::Jurik | MaKind::ArnaudLegoux | MaKind::VariableIndexDynamic | MaKind::Fractal => {
            None
        }
    }
}

/// Expanding-head arithmetic mean of the last `min(i + 1, length)` values.
pub(crate) fn sma_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let window = length.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = Decimal::ZERO;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        let span = (i + 1).min(window);
        out.push(round4(sum / decimal_from_usize(span)));
    }
    out
}

fn smoothing_constant(length: usize) -> Decimal {
    (Decimal::TWO / decimal_from_usize(length + 1)).clamp(Decimal::new(1, 2), Decimal::new(99, 2))
}

/// Exponential recurrence seeded from zero: `ema[0] = value[0] * k`.
pub(crate) fn ema_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let k = smoothing_constant(length);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = Decimal::ZERO;
    for &value in values {
        let next = round4(value * k + prev * (Decimal::ONE - k));
        out.push(next);
        prev = next;
    }
    out
}

fn wilder_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let span = decimal_from_usize(length.max(1));
    let mut out = Vec::with_capacity(values.len());
    let mut prev = Decimal::ZERO;
    for &value in values {
        let next = round4((prev * (span - Decimal::ONE) + value) / span);
        out.push(next);
        prev = next;
    }
    out
}

fn wma_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let window = length.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let span = (i + 1).min(window);
        let mut numerator = Decimal::ZERO;
        let mut denominator = Decimal::ZERO;
        for back in 0..span {
            let weight = decimal_from_usize(span - back);
            numerator += values[i - back] * weight;
            denominator += weight;
        }
        out.push(round4(numerator / denominator));
    }
    out
}

fn dema_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let e1 = ema_series(values, length);
    let e2 = ema_series(&e1, length);
    (0..values.len())
        .map(|i| round4(Decimal::TWO * e1[i] - e2[i]))
        .collect()
}

fn tema_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let e1 = ema_series(values, length);
    let e2 = ema_series(&e1, length);
    let e3 = ema_series(&e2, length);
    let three = Decimal::from(3);
    (0..values.len())
        .map(|i| round4(three * e1[i] - three * e2[i] + e3[i]))
        .collect()
}

fn tma_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let window = length.max(1);
    let first = sma_series(values, window.div_ceil(2));
    sma_series(&first, window / 2 + 1)
}

fn isqrt(value: usize) -> usize {
    let mut root = 1usize;
    while (root + 1) * (root + 1) <= value {
        root += 1;
    }
    root
}

fn hull_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let window = length.max(1);
    let half = wma_series(values, (window / 2).max(1));
    let full = wma_series(values, window);
    let raw: Vec<Decimal> = (0..values.len())
        .map(|i| round4(Decimal::TWO * half[i] - full[i]))
        .collect();
    wma_series(&raw, isqrt(window))
}

fn zlema_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let lag = length.saturating_sub(1) / 2;
    let adjusted: Vec<Decimal> = (0..values.len())
        .map(|i| {
            let prior = if i >= lag { values[i - lag] } else { values[i] };
            round4(values[i] + (values[i] - prior))
        })
        .collect();
    ema_series(&adjusted, length)
}

fn vwma_series(values: &[Decimal], volumes: &[Decimal], length: usize) -> Vec<Decimal> {
    let window = length.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let span = (i + 1).min(window);
        let mut numerator = Decimal::ZERO;
        let mut denominator = Decimal::ZERO;
        for back in 0..span {
            let volume = value_at(volumes, i - back);
            numerator += values[i - back] * volume;
            denominator += volume;
        }
        let average = if denominator.is_zero() {
            Decimal::ZERO
        } else {
            numerator / denominator
        };
        out.push(round4(average));
    }
    out
}

fn kama_series(
    values: &[Decimal],
    length: usize,
    fast_length: Option<usize>,
    slow_length: Option<usize>,
) -> Vec<Decimal> {
    let window = length.max(1);
    let fast = fast_length.filter(|&f| f > 0).unwrap_or(2);
    let slow = slow_length.filter(|&s| s > 0).unwrap_or(window);
    let fast_sc = Decimal::TWO / decimal_from_usize(fast + 1);
    let slow_sc = Decimal::TWO / decimal_from_usize(slow + 1);

    let mut out = Vec::with_capacity(values.len());
    let mut prev = Decimal::ZERO;
    for i in 0..values.len() {
        let anchor = if i >= window {
            values[i - window]
        } else {
            Decimal::ZERO
        };
        let change = (values[i] - anchor).abs();
        let mut noise = Decimal::ZERO;
        for back in 0..window.min(i + 1) {
            let j = i - back;
            let step = if j == 0 {
                values[0]
            } else {
                values[j] - values[j - 1]
            };
            noise += step.abs();
        }
        let efficiency = if noise.is_zero() {
            Decimal::ZERO
        } else {
            (change / noise).clamp(Decimal::ZERO, Decimal::ONE)
        };
        let sc = efficiency * (fast_sc - slow_sc) + slow_sc;
        let next = round4(prev + sc * sc * (values[i] - prev));
        out.push(next);
        prev = next;
    }
    out
}

fn mcginley_series(values: &[Decimal], length: usize) -> Vec<Decimal> {
    let span = decimal_from_usize(length.max(1));
    let mut out = Vec::with_capacity(values.len());
    let mut prev = Decimal::ZERO;
    for &value in values {
        let next = if prev.is_zero() {
            round4(value)
        } else {
            let ratio = value / prev;
            match ratio.checked_powi(4).and_then(|r| span.checked_mul(r)) {
                Some(denominator) if !denominator.is_zero() => {
                    round4(prev + (value - prev) / denominator)
                }
                _ => round4(value),
            }
        };
        out.push(next);
        prev = next;
    }
    out
}
