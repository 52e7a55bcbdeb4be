//! Signal records and chronological normalization.
//!
//! The upstream signal engine emits loosely-shaped JSON records whose field
//! names drift across producers (`time`/`timestamp`/`t`, `signal`/`action`).
//! [`normalize_signals`] collapses them into one strict internal record,
//! [`SignalEvent`], sorted ascending by time. Everything downstream reads
//! only that type.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw signal record as received from the signal engine.
///
/// Every field is optional so a malformed record still deserializes and
/// reaches the converter, which applies a uniform skip policy and reports
/// what it skipped.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawSignalRecord {
    #[serde(default, alias = "timestamp", alias = "t")]
    pub time: Option<serde_json::Value>,
    #[serde(default, alias = "action")]
    pub signal: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
    Wait,
    /// Anything unrecognized, including a missing action field.
    Other,
}

impl SignalKind {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_uppercase()).as_deref() {
            Some("BUY") => SignalKind::Buy,
            Some("SELL") => SignalKind::Sell,
            Some("HOLD") => SignalKind::Hold,
            Some("WAIT") => SignalKind::Wait,
            _ => SignalKind::Other,
        }
    }

    /// Only BUY and SELL ever change replay state.
    pub fn is_actionable(self) -> bool {
        matches!(self, SignalKind::Buy | SignalKind::Sell)
    }
}

/// The strict internal signal record.
///
/// `time` and `price` stay optional: malformed records are carried through
/// the sort rather than dropped, so the converter can account for them.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEvent {
    pub time: Option<DateTime<Utc>>,
    pub kind: SignalKind,
    pub price: Option<f64>,
}

/// Accepts integer/float Unix milliseconds, numeric strings, or RFC 3339.
fn parse_time(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(ms)
        }
        serde_json::Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            let ms: i64 = s.trim().parse().ok()?;
            DateTime::from_timestamp_millis(ms)
        }
        _ => None,
    }
}

/// Sort raw records chronologically and coerce them to [`SignalEvent`]s.
///
/// The sort is stable; records without a parseable timestamp sort ahead of
/// all timestamped ones and keep their relative order. Non-finite prices
/// become `None` so the converter's non-positive-price check covers them.
pub fn normalize_signals(records: &[RawSignalRecord]) -> Vec<SignalEvent> {
    let mut events: Vec<SignalEvent> = records
        .iter()
        .map(|record| SignalEvent {
            time: record.time.as_ref().and_then(parse_time),
            kind: SignalKind::parse(record.signal.as_deref()),
            price: record.price.filter(|p| p.is_finite()),
        })
        .collect();
    events.sort_by_key(|event| event.time);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(time_ms: i64, signal: &str, price: f64) -> RawSignalRecord {
        RawSignalRecord {
            time: Some(json!(time_ms)),
            signal: Some(signal.to_string()),
            price: Some(price),
        }
    }

    #[test]
    fn deserializes_canonical_field_names() {
        let record: RawSignalRecord =
            serde_json::from_value(json!({"time": 1000, "signal": "BUY", "price": 100.0}))
                .unwrap();
        assert_eq!(record.time, Some(json!(1000)));
        assert_eq!(record.signal.as_deref(), Some("BUY"));
        assert_eq!(record.price, Some(100.0));
    }

    #[test]
    fn deserializes_aliased_field_names() {
        let record: RawSignalRecord =
            serde_json::from_value(json!({"timestamp": 1000, "action": "sell", "price": 99.5}))
                .unwrap();
        assert_eq!(record.time, Some(json!(1000)));
        assert_eq!(record.signal.as_deref(), Some("sell"));

        let record: RawSignalRecord =
            serde_json::from_value(json!({"t": 2000, "action": "BUY", "price": 1.0})).unwrap();
        assert_eq!(record.time, Some(json!(2000)));
    }

    #[test]
    fn deserializes_partial_record() {
        let record: RawSignalRecord = serde_json::from_value(json!({"signal": "BUY"})).unwrap();
        assert_eq!(record.time, None);
        assert_eq!(record.price, None);
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(SignalKind::parse(Some("buy")), SignalKind::Buy);
        assert_eq!(SignalKind::parse(Some("  Sell ")), SignalKind::Sell);
        assert_eq!(SignalKind::parse(Some("HOLD")), SignalKind::Hold);
        assert_eq!(SignalKind::parse(Some("wait")), SignalKind::Wait);
        assert_eq!(SignalKind::parse(Some("SHORT")), SignalKind::Other);
        assert_eq!(SignalKind::parse(None), SignalKind::Other);
    }

    #[test]
    fn only_buy_and_sell_are_actionable() {
        assert!(SignalKind::Buy.is_actionable());
        assert!(SignalKind::Sell.is_actionable());
        assert!(!SignalKind::Hold.is_actionable());
        assert!(!SignalKind::Wait.is_actionable());
        assert!(!SignalKind::Other.is_actionable());
    }

    #[test]
    fn normalize_sorts_by_time() {
        let records = vec![raw(3000, "SELL", 110.0), raw(1000, "BUY", 100.0)];
        let events = normalize_signals(&records);
        assert_eq!(events[0].kind, SignalKind::Buy);
        assert_eq!(events[1].kind, SignalKind::Sell);
        assert!(events[0].time < events[1].time);
    }

    #[test]
    fn normalize_keeps_malformed_records() {
        let records = vec![raw(1000, "BUY", 100.0), RawSignalRecord::default()];
        let events = normalize_signals(&records);
        assert_eq!(events.len(), 2);
        // the timeless record sorts first
        assert_eq!(events[0].time, None);
        assert_eq!(events[0].kind, SignalKind::Other);
    }

    #[test]
    fn normalize_parses_rfc3339_and_numeric_string_times() {
        let records = vec![
            RawSignalRecord {
                time: Some(json!("1970-01-01T00:00:02Z")),
                signal: Some("BUY".into()),
                price: Some(10.0),
            },
            RawSignalRecord {
                time: Some(json!("1000")),
                signal: Some("SELL".into()),
                price: Some(10.0),
            },
        ];
        let events = normalize_signals(&records);
        assert_eq!(events[0].kind, SignalKind::Sell);
        assert_eq!(events[0].time, DateTime::from_timestamp_millis(1000));
        assert_eq!(events[1].time, DateTime::from_timestamp_millis(2000));
    }

    #[test]
    fn normalize_drops_non_finite_prices() {
        let records = vec![RawSignalRecord {
            time: Some(json!(1000)),
            signal: Some("BUY".into()),
            price: Some(f64::NAN),
        }];
        let events = normalize_signals(&records);
        assert_eq!(events[0].price, None);
    }

    #[test]
    fn normalize_is_stable_for_equal_times() {
        let records = vec![raw(1000, "BUY", 100.0), raw(1000, "SELL", 101.0)];
        let events = normalize_signals(&records);
        assert_eq!(events[0].kind, SignalKind::Buy);
        assert_eq!(events[1].kind, SignalKind::Sell);
    }
}
