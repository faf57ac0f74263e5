#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

/// OHLCV bar record used to build aligned price series.
pub mod bar;
/// Decimal rounding policy applied to every stored series value.
pub mod rounding;
/// Categorical per-bar trade signal.
pub mod signal;

pub use bar::Bar;
pub use rounding::{decimal_from_usize, round4};
pub use signal::{ParseSignalError, Signal};
