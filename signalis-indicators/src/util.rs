use rust_decimal::Decimal;

/// Reads a series entry, treating missing history as zero.
pub(crate) fn value_at(values: &[Decimal], index: usize) -> Decimal {
    values.get(index).copied().unwrap_or_default()
}

/// Reads the entry one bar before `index`, zero at the series head.
pub(crate) fn prev_at(values: &[Decimal], index: usize) -> Decimal {
    match index.checked_sub(1) {
        Some(prev) => value_at(values, prev),
        None => Decimal::ZERO,
    }
}

/// Truncates or zero-pads a series to the bar count so that every named
/// output honors the length invariant even when a dispatch degraded to an
/// empty sequence.
pub(crate) fn fit_len(mut values: Vec<Decimal>, count: usize) -> Vec<Decimal> {
    values.resize(count, Decimal::ZERO);
    values
}
