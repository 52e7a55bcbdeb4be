//! JSON signal-file adapter.
//!
//! Reads a JSON array of signal objects from the external signal engine.
//! Field names and shapes vary per producer; objects that fail to
//! deserialize become empty records rather than being dropped, so the
//! run-level skip accounting still sees them.

use crate::domain::error::SigreplayError;
use crate::domain::signal::RawSignalRecord;
use crate::ports::data_port::SignalSource;
use std::fs;
use std::path::PathBuf;

pub struct JsonSignalAdapter {
    path: PathBuf,
}

impl JsonSignalAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SignalSource for JsonSignalAdapter {
    fn fetch_signals(&self) -> Result<Vec<RawSignalRecord>, SigreplayError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SigreplayError::DataSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let values: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| SigreplayError::DataSource {
                reason: format!("JSON parse error in {}: {}", self.path.display(), e),
            })?;

        Ok(values
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_json(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.json");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn fetches_heterogeneous_records() {
        let (_dir, path) = write_json(
            r#"[
                {"time": 1000, "signal": "BUY", "price": 100.0},
                {"timestamp": 2000, "action": "sell", "price": 110.0},
                {"t": 3000, "action": "HOLD", "price": 105.0}
            ]"#,
        );
        let records = JsonSignalAdapter::new(path).fetch_signals().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].time, Some(json!(1000)));
        assert_eq!(records[1].time, Some(json!(2000)));
        assert_eq!(records[1].signal.as_deref(), Some("sell"));
        assert_eq!(records[2].time, Some(json!(3000)));
    }

    #[test]
    fn undecodable_objects_become_empty_records() {
        let (_dir, path) = write_json(
            r#"[
                {"time": 1000, "signal": "BUY", "price": 100.0},
                {"time": 2000, "signal": "SELL", "price": "not a number"},
                42
            ]"#,
        );
        let records = JsonSignalAdapter::new(path).fetch_signals().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1], RawSignalRecord::default());
        assert_eq!(records[2], RawSignalRecord::default());
    }

    #[test]
    fn non_array_document_is_a_hard_error() {
        let (_dir, path) = write_json(r#"{"signals": []}"#);
        let err = JsonSignalAdapter::new(path).fetch_signals().unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn missing_file_is_a_hard_error() {
        let adapter = JsonSignalAdapter::new(PathBuf::from("/nonexistent/signals.json"));
        assert!(adapter.fetch_signals().is_err());
    }

    #[test]
    fn empty_array_yields_no_records() {
        let (_dir, path) = write_json("[]");
        let records = JsonSignalAdapter::new(path).fetch_signals().unwrap();
        assert!(records.is_empty());
    }
}
