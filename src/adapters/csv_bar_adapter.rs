//! CSV price-bar adapter.
//!
//! Expects a header row and `time,open,high,low,close,volume` columns; the
//! time column accepts Unix milliseconds or RFC 3339. Rows are sorted by
//! time after loading. Bars are trusted input: any malformed row is a hard
//! error, unlike the tolerated signal-level noise.

use crate::domain::bar::PriceBar;
use crate::domain::error::SigreplayError;
use crate::ports::data_port::BarSource;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

pub struct CsvBarAdapter {
    path: PathBuf,
}

impl CsvBarAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn parse_bar_time(raw: &str) -> Result<DateTime<Utc>, SigreplayError> {
    if let Ok(ms) = raw.trim().parse::<i64>() {
        return DateTime::from_timestamp_millis(ms).ok_or_else(|| SigreplayError::DataSource {
            reason: format!("timestamp out of range: {ms}"),
        });
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SigreplayError::DataSource {
            reason: format!("invalid time value {raw:?}: {e}"),
        })
}

fn get_column<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, SigreplayError> {
    record.get(index).ok_or_else(|| SigreplayError::DataSource {
        reason: format!("missing {name} column"),
    })
}

fn parse_column(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, SigreplayError> {
    get_column(record, index, name)?
        .trim()
        .parse()
        .map_err(|e| SigreplayError::DataSource {
            reason: format!("invalid {name} value: {e}"),
        })
}

impl BarSource for CsvBarAdapter {
    fn fetch_bars(&self) -> Result<Vec<PriceBar>, SigreplayError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SigreplayError::DataSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| SigreplayError::DataSource {
                reason: format!("CSV parse error: {e}"),
            })?;

            bars.push(PriceBar {
                time: parse_bar_time(get_column(&record, 0, "time")?)?,
                open: parse_column(&record, 1, "open")?,
                high: parse_column(&record, 2, "high")?,
                low: parse_column(&record, 3, "low")?,
                close: parse_column(&record, 4, "close")?,
                volume: parse_column(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|bar| bar.time);
        Ok(bars)
    }
}
