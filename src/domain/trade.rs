//! Positions and completed trades.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

/// Open position during a replay. At most one exists at any point; it is
/// created and destroyed entirely within a single conversion pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub direction: Direction,
    /// Slippage-adjusted execution price.
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
    pub entry_bar: usize,
}

/// A completed round trip. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub direction: Direction,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_price: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    /// Net profit relative to entry price, in percent.
    pub profit_percent: f64,
    pub holding_duration_ms: i64,
    pub fees_paid: f64,
    /// Maximum adverse excursion: worst unrealized loss before exit.
    pub mae: f64,
    /// Maximum favorable excursion: best unrealized gain before exit.
    pub mfe: f64,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.net_profit > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.net_profit < 0.0
    }
}
