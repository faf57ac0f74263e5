//! End-to-end coverage of the computation contract: length invariants,
//! chaining semantics and reproducibility.

use std::str::FromStr;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use signalis_core::{Bar, Signal};
use signalis_indicators::indicators::{
    bollinger_bands, ema, macd, median_price, rsi, sma, std_dev_volatility, typical_price,
    weighted_close, BollingerBandsParams, EmaParams, MacdParams, RsiParams, SmaParams,
    VolatilityParams,
};
use signalis_indicators::{IndicatorError, IndicatorOutput, Input, MaKind, Pipeline, PriceSeries};

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn series_from_closes(closes: &[&str]) -> PriceSeries {
    let closes: Vec<Decimal> = closes.iter().map(|v| dec(v)).collect();
    PriceSeries::from_columns(
        Vec::new(),
        closes.clone(),
        closes.iter().map(|c| c + Decimal::ONE).collect(),
        closes.iter().map(|c| c - Decimal::ONE).collect(),
        closes.clone(),
        vec![Decimal::from(250); closes.len()],
    )
}

fn sample_series() -> PriceSeries {
    series_from_closes(&[
        "10", "11", "12", "11", "10", "9", "10", "11", "12", "13", "14", "13", "12", "11", "12",
    ])
}

fn assert_lengths(output: &IndicatorOutput, count: usize) {
    assert_eq!(output.signals.len(), count, "{}: signals", output.indicator);
    for (name, values) in &output.outputs {
        assert_eq!(values.len(), count, "{}: {name}", output.indicator);
    }
}

#[test]
fn every_indicator_honors_the_length_invariant() {
    let series = sample_series();
    let count = series.count();
    let input = Input::Close;

    assert_lengths(&sma(&series, &input, &SmaParams::default()), count);
    assert_lengths(&ema(&series, &input, &EmaParams::default()), count);
    assert_lengths(&rsi(&series, &input, &RsiParams::default()), count);
    assert_lengths(&macd(&series, &input, &MacdParams::default()), count);
    assert_lengths(
        &std_dev_volatility(&series, &input, &VolatilityParams::default()),
        count,
    );
    assert_lengths(
        &bollinger_bands(&series, &input, &BollingerBandsParams::default()),
        count,
    );
    assert_lengths(&median_price(&series, &input), count);
    assert_lengths(&typical_price(&series, &input), count);
    assert_lengths(&weighted_close(&series, &input), count);
}

#[test]
fn mismatched_columns_degrade_every_output_to_empty() {
    let series = PriceSeries::from_columns(
        Vec::new(),
        vec![Decimal::ONE, Decimal::TWO],
        vec![Decimal::TWO],
        vec![Decimal::ZERO],
        vec![Decimal::ONE],
        vec![Decimal::TEN],
    );
    assert_eq!(series.count(), 0);
    let out = rsi(&series, &Input::Close, &RsiParams::default());
    assert_lengths(&out, 0);
    assert!(out.scalar.is_empty());
}

#[test]
fn bar_construction_matches_column_construction() {
    let bars: Vec<Bar> = [("10", "11", "9"), ("12", "13", "11"), ("11", "12", "10")]
        .iter()
        .enumerate()
        .map(|(i, (close, high, low))| Bar {
            timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap(),
            open: dec(close),
            high: dec(high),
            low: dec(low),
            close: dec(close),
            volume: Decimal::from(100),
        })
        .collect();
    let from_bars = PriceSeries::from_bars(&bars);

    let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
    let from_columns = PriceSeries::from_columns(
        bars.iter().map(|b| b.timestamp).collect(),
        bars.iter().map(|b| b.open).collect(),
        bars.iter().map(|b| b.high).collect(),
        bars.iter().map(|b| b.low).collect(),
        closes,
        bars.iter().map(|b| b.volume).collect(),
    );

    assert_eq!(from_bars, from_columns);
    assert_eq!(
        sma(&from_bars, &Input::Close, &SmaParams { length: 2 }),
        sma(&from_columns, &Input::Close, &SmaParams { length: 2 }),
    );
}

#[test]
fn chaining_off_bollinger_bands_is_the_documented_hard_error() {
    let mut pipeline = Pipeline::new(sample_series());
    pipeline
        .run(|s, i| bollinger_bands(s, i, &BollingerBandsParams::default()))
        .unwrap();
    let err = pipeline
        .run(|s, i| ema(s, i, &EmaParams::default()))
        .unwrap_err();
    assert_eq!(err, IndicatorError::ScalarInputRequired);
    // The failed call leaves the chain state untouched.
    assert_eq!(pipeline.last().unwrap().indicator, "BollingerBands");
}

#[test]
fn sma_into_ema_feeds_the_scalar_through() {
    let series = sample_series();
    let sma_out = sma(&series, &Input::Close, &SmaParams { length: 3 });

    let mut pipeline = Pipeline::new(series.clone());
    pipeline
        .run(|s, i| sma(s, i, &SmaParams { length: 3 }))
        .unwrap();
    let chained = pipeline
        .run(|s, i| ema(s, i, &EmaParams { length: 3 }))
        .unwrap()
        .clone();

    let explicit = ema(
        &series,
        &Input::Series(sma_out.scalar.clone()),
        &EmaParams { length: 3 },
    );
    assert_eq!(chained, explicit);

    let direct = ema(&series, &Input::Close, &EmaParams { length: 3 });
    assert_ne!(chained.scalar, direct.scalar);
}

#[test]
fn cleared_pipeline_reproduces_bit_identical_output() {
    let mut pipeline = Pipeline::new(sample_series());
    let first = pipeline
        .run(|s, i| rsi(s, i, &RsiParams::default()))
        .unwrap()
        .clone();
    pipeline
        .run(|s, i| ema(s, i, &EmaParams::default()))
        .unwrap();

    pipeline.clear();
    let second = pipeline
        .run(|s, i| rsi(s, i, &RsiParams::default()))
        .unwrap()
        .clone();
    assert_eq!(first, second);
}

#[test]
fn rsi_of_rsi_runs_on_synthesized_bounds() {
    // The first RSI lives in 0..=100 while prices sit near 10, so the
    // resolver must synthesize bounds for the second pass.
    let mut pipeline = Pipeline::new(series_from_closes(&[
        "10", "10.5", "10.2", "10.8", "10.4", "11", "10.6", "11.2", "10.9", "11.5",
    ]));
    pipeline
        .run(|s, i| {
            rsi(
                s,
                i,
                &RsiParams {
                    length: 3,
                    ..RsiParams::default()
                },
            )
        })
        .unwrap();
    let second = pipeline
        .run(|s, i| {
            rsi(
                s,
                i,
                &RsiParams {
                    length: 3,
                    ..RsiParams::default()
                },
            )
        })
        .unwrap();
    assert_eq!(second.scalar.len(), 10);
    assert!(second
        .scalar
        .iter()
        .all(|v| *v >= Decimal::ZERO && *v <= Decimal::ONE_HUNDRED));
}

#[test]
fn unregistered_kind_degrades_to_zero_series_end_to_end() {
    let series = sample_series();
    let count = series.count();
    let out = macd(
        &series,
        &Input::Close,
        &MacdParams {
            ma_kind: MaKind::Jurik,
            ..MacdParams::default()
        },
    );

    assert_lengths(&out, count);
    for name in ["Macd", "Signal", "Histogram"] {
        let values = out.output(name).unwrap();
        assert!(values.iter().all(|v| v.is_zero()), "{name} should be zero");
    }
    assert!(out.signals.iter().all(|s| *s == Signal::None));
    // The scalar is a zero series of full length, so chaining still works.
    assert_eq!(out.scalar.len(), count);
    assert!(out.as_input().is_ok());

    // Indicators that post-process the dispatch result stay in range too.
    let rsi_out = rsi(
        &series,
        &Input::Close,
        &RsiParams {
            ma_kind: MaKind::Jurik,
            ..RsiParams::default()
        },
    );
    assert_lengths(&rsi_out, count);
    assert!(rsi_out
        .scalar
        .iter()
        .all(|v| *v >= Decimal::ZERO && *v <= Decimal::ONE_HUNDRED));
}

#[test]
fn macd_histogram_crossing_emits_strong_buy() {
    let mut closes: Vec<String> = (0..10).map(|i| (30 - i).to_string()).collect();
    closes.extend((0..12).map(|i| (21 + 2 * i).to_string()));
    let refs: Vec<&str> = closes.iter().map(String::as_str).collect();
    let series = series_from_closes(&refs);

    let out = macd(
        &series,
        &Input::Close,
        &MacdParams {
            fast_length: 3,
            slow_length: 6,
            signal_length: 3,
            ..MacdParams::default()
        },
    );
    let histogram = out.output("Histogram").unwrap();
    let crossing = (1..histogram.len()).find(|&i| {
        histogram[i] > Decimal::ZERO
            && histogram[i] > histogram[i - 1]
            && histogram[i - 1] <= Decimal::ZERO
    });
    let bar = crossing.expect("histogram should cross above zero during the rally");
    assert_eq!(out.signals[bar], Signal::StrongBuy);
}
