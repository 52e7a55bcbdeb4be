#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::json;
use sigreplay::domain::bar::PriceBar;
use sigreplay::domain::engine::BacktestConfig;
use sigreplay::domain::signal::RawSignalRecord;

pub fn ts(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

pub fn make_bar(ms: i64, close: f64) -> PriceBar {
    PriceBar {
        time: ts(ms),
        open: close,
        high: close + 5.0,
        low: close - 5.0,
        close,
        volume: 1000.0,
    }
}

pub fn make_bar_hl(ms: i64, high: f64, low: f64) -> PriceBar {
    PriceBar {
        time: ts(ms),
        open: (high + low) / 2.0,
        high,
        low,
        close: (high + low) / 2.0,
        volume: 1000.0,
    }
}

/// `count` bars at one-second spacing, all at the same price.
pub fn flat_bars(count: i64, close: f64) -> Vec<PriceBar> {
    (0..count).map(|i| make_bar(i * 1000, close)).collect()
}

pub fn raw(time_ms: i64, signal: &str, price: f64) -> RawSignalRecord {
    RawSignalRecord {
        time: Some(json!(time_ms)),
        signal: Some(signal.to_string()),
        price: Some(price),
    }
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig::new(10_000.0)
}
