//! Signal-to-trade conversion.
//!
//! Replays the sorted signal stream through a FLAT/LONG/SHORT state machine.
//! The first actionable signal while flat opens a position; the first signal
//! of the opposite direction closes it and emits a [`Trade`]. Repeated
//! same-direction signals while a position is open are no-ops, which keeps a
//! 1:1 mapping between signal pairs and trades no matter how noisy the
//! stream is. Conversion never fails: malformed signals are skipped and the
//! skips reported.

use chrono::{DateTime, Utc};

use super::bar::{PriceBar, bar_index_at};
use super::excursion::compute_excursion;
use super::signal::{SignalEvent, SignalKind};
use super::trade::{Direction, Position, Trade};

/// Why a signal was dropped before reaching the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    MissingTime,
    MissingPrice,
    NonPositivePrice,
    /// HOLD, WAIT, or an unrecognized action.
    IgnorableKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSignal {
    /// Index into the sorted event stream.
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub trades: Vec<Trade>,
    pub skipped: Vec<SkippedSignal>,
}

/// Entry execution price: longs pay up, shorts sell down.
pub fn apply_slippage_entry(market_price: f64, direction: Direction, slippage_rate: f64) -> f64 {
    match direction {
        Direction::Long => market_price * (1.0 + slippage_rate),
        Direction::Short => market_price * (1.0 - slippage_rate),
    }
}

/// Exit execution price: selling a long slips down, covering a short slips up.
pub fn apply_slippage_exit(market_price: f64, direction: Direction, slippage_rate: f64) -> f64 {
    match direction {
        Direction::Long => market_price * (1.0 - slippage_rate),
        Direction::Short => market_price * (1.0 + slippage_rate),
    }
}

/// Round-trip fee charged on close: `(entry + exit) * fee_rate`.
pub fn round_trip_fee(entry_price: f64, exit_price: f64, fee_rate: f64) -> f64 {
    (entry_price + exit_price) * fee_rate
}

/// Replay `events` (already sorted by [`super::signal::normalize_signals`])
/// against `bars` and emit completed trades.
///
/// A position still open when the stream ends is discarded: without a
/// matching exit signal there is no execution to price it at.
pub fn convert_signals(
    events: &[SignalEvent],
    bars: &[PriceBar],
    fee_rate: f64,
    slippage_rate: f64,
) -> Conversion {
    let mut trades = Vec::new();
    let mut skipped = Vec::new();
    let mut open: Option<Position> = None;

    for (index, event) in events.iter().enumerate() {
        let Some(time) = event.time else {
            skipped.push(SkippedSignal {
                index,
                reason: SkipReason::MissingTime,
            });
            continue;
        };
        let Some(price) = event.price else {
            skipped.push(SkippedSignal {
                index,
                reason: SkipReason::MissingPrice,
            });
            continue;
        };
        if price <= 0.0 {
            skipped.push(SkippedSignal {
                index,
                reason: SkipReason::NonPositivePrice,
            });
            continue;
        }
        let direction = match event.kind {
            SignalKind::Buy => Direction::Long,
            SignalKind::Sell => Direction::Short,
            SignalKind::Hold | SignalKind::Wait | SignalKind::Other => {
                skipped.push(SkippedSignal {
                    index,
                    reason: SkipReason::IgnorableKind,
                });
                continue;
            }
        };

        match open.take() {
            None => {
                open = Some(Position {
                    direction,
                    entry_price: apply_slippage_entry(price, direction, slippage_rate),
                    entry_time: time,
                    entry_bar: bar_index_at(bars, time),
                });
            }
            // redundant same-direction signal: first entry wins
            Some(position) if position.direction == direction => {
                open = Some(position);
            }
            Some(position) => {
                trades.push(close_position(
                    position,
                    price,
                    time,
                    bars,
                    fee_rate,
                    slippage_rate,
                ));
            }
        }
    }

    Conversion { trades, skipped }
}

fn close_position(
    position: Position,
    market_price: f64,
    exit_time: DateTime<Utc>,
    bars: &[PriceBar],
    fee_rate: f64,
    slippage_rate: f64,
) -> Trade {
    let exit_price = apply_slippage_exit(market_price, position.direction, slippage_rate);

    let gross_profit = match position.direction {
        Direction::Long => exit_price - position.entry_price,
        Direction::Short => position.entry_price - exit_price,
    };
    let fees_paid = round_trip_fee(position.entry_price, exit_price, fee_rate);
    let net_profit = gross_profit - fees_paid;

    let exit_bar = bar_index_at(bars, exit_time);
    let excursion = compute_excursion(
        bars,
        position.entry_bar,
        exit_bar,
        position.direction,
        position.entry_price,
    );

    Trade {
        direction: position.direction,
        entry_time: position.entry_time,
        exit_time,
        entry_price: position.entry_price,
        exit_price,
        gross_profit,
        net_profit,
        profit_percent: net_profit / position.entry_price * 100.0,
        holding_duration_ms: (exit_time - position.entry_time).num_milliseconds(),
        fees_paid,
        mae: excursion.mae,
        mfe: excursion.mfe,
    }
}
