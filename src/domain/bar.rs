//! Price bar representation.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Index of the latest bar whose time is at or before `time`.
///
/// Signals fire intra-bar, so the owning bar is the last one that opened at
/// or before the signal timestamp. Times before the first bar clamp to
/// index 0. Assumes `bars` is sorted by time, non-empty not required.
pub fn bar_index_at(bars: &[PriceBar], time: DateTime<Utc>) -> usize {
    let after = bars.partition_point(|bar| bar.time <= time);
    after.saturating_sub(1)
}
