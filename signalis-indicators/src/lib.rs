#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

/// Per-bar signal classification rules.
pub mod classify;
/// Error type shared by the crate.
pub mod error;
/// Built-in indicator functions.
pub mod indicators;
/// Moving average kinds and the strategy dispatcher.
pub mod ma;
/// Computation results and the fluent pipeline.
pub mod output;
/// Input resolution: choosing the series an indicator computes over.
pub mod resolve;
/// Aligned OHLCV series container.
pub mod series;
mod util;

pub use crate::error::IndicatorError;
pub use crate::ma::{moving_average, moving_average_ext, FallbackPolicy, MaKind, ParseMaKindError};
pub use crate::output::{IndicatorOutput, Pipeline};
pub use crate::resolve::{resolve, Input, Resolved};
pub use crate::series::PriceSeries;
