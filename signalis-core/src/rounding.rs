use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept in every stored series value.
pub const SCALE: u32 = 4;

/// Rounds a value to the series precision using banker's rounding.
///
/// Applied to every value appended to any output or scratch series,
/// including synthesized high/low buffers and intermediate smoothing
/// stages, so that adjacent implementations reproduce identical output.
#[must_use]
pub fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Converts a window length into a decimal divisor.
#[must_use]
pub fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from(value as u64)
}
