use thiserror::Error;

use crate::ma::MaKind;

/// Error type surfaced by indicator computations.
///
/// Only `ScalarInputRequired` aborts a computation chain; every other
/// anomaly degrades to an empty or zeroed series with a logged diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The previous computation produced no single scalar series (for
    /// example Bollinger Bands), so it cannot feed the next stage without
    /// the caller explicitly selecting one of its named outputs.
    #[error("previous indicator produced no scalar series; pass one of its named outputs explicitly")]
    ScalarInputRequired,
    /// The requested moving average kind has no registered algorithm and
    /// the dispatcher runs under [`crate::FallbackPolicy::Strict`].
    #[error("unsupported moving average kind: {0}")]
    UnsupportedMovingAverage(MaKind),
}
