use serde::{Deserialize, Serialize};

/// Categorical trade indication produced for every bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// No actionable indication.
    #[default]
    None,
    /// Bullish indication.
    Buy,
    /// Bearish indication.
    Sell,
    /// Bullish indication with momentum confirmation.
    StrongBuy,
    /// Bearish indication with momentum confirmation.
    StrongSell,
}

impl Signal {
    /// Swaps buy/sell polarity; `None` maps to itself.
    ///
    /// Classifier rules use this to honor their reversed flag without
    /// duplicating the decision tables.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Signal::None => Signal::None,
            Signal::Buy => Signal::Sell,
            Signal::Sell => Signal::Buy,
            Signal::StrongBuy => Signal::StrongSell,
            Signal::StrongSell => Signal::StrongBuy,
        }
    }

    /// Returns the snake_case name of the signal.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::None => "none",
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::StrongBuy => "strong_buy",
            Signal::StrongSell => "strong_sell",
        }
    }

    /// True for `Buy` and `StrongBuy`.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        matches!(self, Signal::Buy | Signal::StrongBuy)
    }

    /// True for `Sell` and `StrongSell`.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        matches!(self, Signal::Sell | Signal::StrongSell)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a signal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSignalError;

impl std::fmt::Display for ParseSignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid signal")
    }
}

impl std::error::Error for ParseSignalError {}

impl std::str::FromStr for Signal {
    type Err = ParseSignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Signal::None),
            "buy" => Ok(Signal::Buy),
            "sell" => Ok(Signal::Sell),
            "strong_buy" => Ok(Signal::StrongBuy),
            "strong_sell" => Ok(Signal::StrongSell),
            _ => Err(ParseSignalError),
        }
    }
}
