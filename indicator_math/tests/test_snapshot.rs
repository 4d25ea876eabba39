use chrono::NaiveDate;
use market_data::{Observation, OhlcvBar, Series};

use indicator_math::snapshot::{BollingerParams, StochasticParams};
use indicator_math::{compute_indicators, IndicatorConfig, IndicatorError};

/// Build a series of `closes.len()` consecutive trading days.
fn series_from_closes(closes: &[f64]) -> Series {
    let mut date = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    let mut observations = Vec::with_capacity(closes.len());
    for &close in closes {
        observations.push(Observation {
            date,
            bar: OhlcvBar {
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10_000,
            },
        });
        date = date.succ_opt().unwrap();
    }
    Series::new(observations).unwrap()
}

fn ascending_series(len: usize) -> Series {
    let closes: Vec<f64> = (1..=len).map(|i| 100.0 + i as f64).collect();
    series_from_closes(&closes)
}

#[test]
fn empty_series_is_rejected() {
    let series = Series::new(Vec::new()).unwrap();
    let err = compute_indicators(&series, &IndicatorConfig::default()).unwrap_err();
    assert!(matches!(err, IndicatorError::EmptySeries));
}

#[test]
fn full_history_defines_every_default_indicator() {
    let series = ascending_series(250);
    let snapshot = compute_indicators(&series, &IndicatorConfig::default()).unwrap();

    for name in [
        "SMA_50",
        "SMA_200",
        "EMA_12",
        "EMA_26",
        "RSI",
        "MACD",
        "MACD_Signal",
    ] {
        assert!(snapshot.is_defined(name), "{name} should be defined");
    }

    assert_eq!(snapshot.date, series.last_date().unwrap());
    assert_eq!(snapshot.close, 350.0);
}

#[test]
fn ascending_series_orders_the_moving_averages() {
    let series = ascending_series(250);
    let snapshot = compute_indicators(&series, &IndicatorConfig::default()).unwrap();

    let sma_50 = snapshot.get("SMA_50").unwrap().unwrap();
    let sma_200 = snapshot.get("SMA_200").unwrap().unwrap();
    assert!(sma_50 >= sma_200, "short SMA must lead on a rising series");

    let rsi = snapshot.get("RSI").unwrap().unwrap();
    assert!((0.0..=100.0).contains(&rsi));
}

#[test]
fn short_series_reports_missing_not_absent() {
    // 60 points: enough for SMA_50 but not SMA_200.
    let series = ascending_series(60);
    let snapshot = compute_indicators(&series, &IndicatorConfig::default()).unwrap();

    assert!(snapshot.is_defined("SMA_50"));
    assert_eq!(snapshot.get("SMA_200"), Some(None));
    assert!(snapshot.is_defined("MACD_Signal"));
}

#[test]
fn very_short_series_still_returns_a_snapshot() {
    let series = ascending_series(5);
    let snapshot = compute_indicators(&series, &IndicatorConfig::default()).unwrap();

    for name in ["SMA_50", "SMA_200", "EMA_12", "EMA_26", "RSI", "MACD", "MACD_Signal"] {
        assert_eq!(snapshot.get(name), Some(None), "{name} should be missing");
    }
    assert_eq!(snapshot.date, series.last_date().unwrap());
}

#[test]
fn optional_indicators_appear_only_when_enabled() {
    let series = ascending_series(100);

    let default_snapshot = compute_indicators(&series, &IndicatorConfig::default()).unwrap();
    assert_eq!(default_snapshot.get("BB_Middle"), None);
    assert_eq!(default_snapshot.get("Stoch_K"), None);

    let config = IndicatorConfig {
        bollinger: Some(BollingerParams::default()),
        stochastic: Some(StochasticParams::default()),
        ..IndicatorConfig::default()
    };
    let snapshot = compute_indicators(&series, &config).unwrap();
    for name in ["BB_Middle", "BB_Upper", "BB_Lower", "Stoch_K", "Stoch_D"] {
        assert!(snapshot.is_defined(name), "{name} should be defined");
    }
}

#[test]
fn missing_values_serialize_as_null() {
    let series = ascending_series(60);
    let snapshot = compute_indicators(&series, &IndicatorConfig::default()).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["TradingDate"], "2022-03-03");
    assert!(json["ClosePrice"].is_number());
    assert!(json["SMA_200"].is_null());
    assert!(json["SMA_50"].is_number());
}

#[test]
fn snapshot_is_idempotent_and_leaves_the_series_intact() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
        .collect();
    let series = series_from_closes(&closes);
    let before = series.clone();

    let first = compute_indicators(&series, &IndicatorConfig::default()).unwrap();
    let second = compute_indicators(&series, &IndicatorConfig::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(series, before);
}

#[test]
fn zero_window_is_a_config_error() {
    let series = ascending_series(10);
    let config = IndicatorConfig {
        sma_windows: vec![0],
        ..IndicatorConfig::default()
    };
    let err = compute_indicators(&series, &config).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidConfig(_)));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: IndicatorConfig = serde_json::from_str(r#"{ "rsi_window": 7 }"#).unwrap();
    assert_eq!(config.rsi_window, 7);
    assert_eq!(config.sma_windows, vec![50, 200]);
    assert!(config.bollinger.is_none());
}
