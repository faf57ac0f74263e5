use std::collections::HashMap;

use rust_decimal::Decimal;
use signalis_core::Signal;

use crate::error::IndicatorError;
use crate::resolve::Input;
use crate::series::PriceSeries;

/// The result of one indicator computation.
///
/// Every named output series and the signal list have length equal to the
/// series bar count. `scalar` holds the canonical single-series output when
/// the indicator has exactly one; multi-series indicators such as Bollinger
/// Bands leave it empty, which makes chaining from them a hard error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorOutput {
    /// Name of the indicator that produced this result.
    pub indicator: String,
    /// Canonical scalar series, empty when no single natural output exists.
    pub scalar: Vec<Decimal>,
    /// Named output series, e.g. `"UpperBand"`.
    pub outputs: HashMap<String, Vec<Decimal>>,
    /// One categorical signal per bar.
    pub signals: Vec<Signal>,
}

impl IndicatorOutput {
    /// Converts this result into the next computation's input.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::ScalarInputRequired`] when the indicator
    /// produced named outputs but no canonical scalar; the caller must pick
    /// one of the `outputs` entries explicitly instead.
    pub fn as_input(&self) -> Result<Input, IndicatorError> {
        if !self.scalar.is_empty() {
            Ok(Input::Series(self.scalar.clone()))
        } else if !self.signals.is_empty() {
            Err(IndicatorError::ScalarInputRequired)
        } else {
            Ok(Input::Close)
        }
    }

    /// Looks up a named output series.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&[Decimal]> {
        self.outputs.get(name).map(Vec::as_slice)
    }
}

/// Fluent chaining over one price series.
///
/// Each `run` feeds the previous result's canonical scalar into the next
/// indicator, so `sma` then `ema` computes the EMA of the SMA. A fresh or
/// cleared pipeline feeds the closing prices.
#[derive(Debug, Clone)]
pub struct Pipeline {
    series: PriceSeries,
    last: Option<IndicatorOutput>,
}

impl Pipeline {
    /// Creates a pipeline over the given series.
    #[must_use]
    pub fn new(series: PriceSeries) -> Self {
        Self { series, last: None }
    }

    /// The underlying price series.
    #[must_use]
    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    /// The most recent computation result, if any.
    #[must_use]
    pub fn last(&self) -> Option<&IndicatorOutput> {
        self.last.as_ref()
    }

    /// Drops the chained state so the next `run` starts from the closing
    /// prices again. The raw series is untouched.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Runs one indicator with the implicitly resolved input and stores its
    /// result as the chain state.
    ///
    /// # Errors
    ///
    /// Propagates [`IndicatorError::ScalarInputRequired`] when the previous
    /// result cannot serve as a scalar input; the chain state is left
    /// unchanged in that case.
    pub fn run<F>(&mut self, indicator: F) -> Result<&IndicatorOutput, IndicatorError>
    where
        F: FnOnce(&PriceSeries, &Input) -> IndicatorOutput,
    {
        let input = match &self.last {
            Some(last) => last.as_input()?,
            None => Input::Close,
        };
        let result = indicator(&self.series, &input);
        Ok(self.last.insert(result))
    }
}
