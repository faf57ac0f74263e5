//! Built-in indicator functions.
//!
//! Each function follows the same contract: resolve the input, compute one
//! value per bar in index order, name every produced series, set the
//! canonical scalar only when a single natural output exists, and classify
//! one signal per bar.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod transform;
pub mod volatility;

pub use bollinger::{bollinger_bands, BollingerBandsParams};
pub use ema::{ema, EmaParams};
pub use macd::{macd, MacdParams};
pub use rsi::{rsi, RsiParams};
pub use sma::{sma, SmaParams};
pub use transform::{median_price, typical_price, weighted_close};
pub use volatility::{std_dev_volatility, VolatilityParams};
