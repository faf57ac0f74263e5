use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use signalis_core::{round4, Bar};
use tracing::warn;

/// Aligned OHLCV columns plus timestamps, the raw side of every
/// computation.
///
/// The series is immutable once built: indicator calls read it and return
/// their own [`crate::IndicatorOutput`] instead of mutating shared scratch
/// state. Every stored value is rounded on ingestion per the series
/// rounding policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    timestamps: Vec<DateTime<Utc>>,
    opens: Vec<Decimal>,
    highs: Vec<Decimal>,
    lows: Vec<Decimal>,
    closes: Vec<Decimal>,
    volumes: Vec<Decimal>,
    count: usize,
}

impl PriceSeries {
    /// Builds a series from parallel columns.
    ///
    /// An empty timestamp vector is treated as "timestamps absent" and
    /// excluded from the alignment check. Mismatched column lengths degrade
    /// the bar count to zero instead of failing; this mirrors the legacy
    /// behavior downstream formulas rely on and is reported via `tracing`.
    #[must_use]
    pub fn from_columns(
        timestamps: Vec<DateTime<Utc>>,
        opens: Vec<Decimal>,
        highs: Vec<Decimal>,
        lows: Vec<Decimal>,
        closes: Vec<Decimal>,
        volumes: Vec<Decimal>,
    ) -> Self {
        let opens = rounded(opens);
        let highs = rounded(highs);
        let lows = rounded(lows);
        let closes = rounded(closes);
        let volumes = rounded(volumes);
        let count = aligned_count(
            timestamps.len(),
            [
                opens.len(),
                highs.len(),
                lows.len(),
                closes.len(),
                volumes.len(),
            ],
        );

        Self {
            timestamps,
            opens,
            highs,
            lows,
            closes,
            volumes,
            count,
        }
    }

    /// Builds a series by unpacking bar records column-wise.
    ///
    /// Produces state identical to [`PriceSeries::from_columns`] over the
    /// same values.
    #[must_use]
    pub fn from_bars(bars: &[Bar]) -> Self {
        Self::from_columns(
            bars.iter().map(|b| b.timestamp).collect(),
            bars.iter().map(|b| b.open).collect(),
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            bars.iter().map(|b| b.close).collect(),
            bars.iter().map(|b| b.volume).collect(),
        )
    }

    /// Number of aligned bars; zero when the input columns disagreed.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Bar open times.
    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Opening prices.
    #[must_use]
    pub fn opens(&self) -> &[Decimal] {
        &self.opens
    }

    /// High prices.
    #[must_use]
    pub fn highs(&self) -> &[Decimal] {
        &self.highs
    }

    /// Low prices.
    #[must_use]
    pub fn lows(&self) -> &[Decimal] {
        &self.lows
    }

    /// Closing prices, the default input series.
    #[must_use]
    pub fn closes(&self) -> &[Decimal] {
        &self.closes
    }

    /// Traded volumes.
    #[must_use]
    pub fn volumes(&self) -> &[Decimal] {
        &self.volumes
    }
}

fn rounded(values: Vec<Decimal>) -> Vec<Decimal> {
    values.into_iter().map(round4).collect()
}

/// Validates column alignment, returning the common length or zero.
fn aligned_count(timestamps: usize, lengths: [usize; 5]) -> usize {
    let common = lengths[0];
    let aligned =
        lengths.iter().all(|&len| len == common) && (timestamps == 0 || timestamps == common);
    if aligned {
        common
    } else {
        warn!(
            ?lengths,
            timestamps, "price columns have mismatched lengths, degrading bar count to zero"
        );
        0
    }
}
