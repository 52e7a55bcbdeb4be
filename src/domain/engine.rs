//! Backtest engine entry point.
//!
//! One call replays one closed batch of signals against one batch of price
//! bars. The engine holds no state between runs and never mutates its
//! inputs, so independent backtests can run concurrently from separate
//! invocations.

use super::bar::PriceBar;
use super::convert::{Conversion, SkippedSignal, convert_signals};
use super::equity::{Drawdown, EquityPoint, build_equity_curve, compute_drawdown};
use super::error::SigreplayError;
use super::metrics::MetricsRecord;
use super::signal::{RawSignalRecord, normalize_signals};
use super::trade::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub starting_capital: f64,
    /// Fraction, e.g. 0.001 = 0.1% per leg.
    pub fee_rate: f64,
    /// Fraction applied against the fill on every entry and exit.
    pub slippage_rate: f64,
}

impl BacktestConfig {
    pub fn new(starting_capital: f64) -> Self {
        BacktestConfig {
            starting_capital,
            fee_rate: 0.0,
            slippage_rate: 0.0,
        }
    }
}

/// Complete output of one replay, returned by value.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestReport {
    pub trades: Vec<Trade>,
    pub metrics: MetricsRecord,
    pub equity_curve: Vec<EquityPoint>,
    pub drawdown: Drawdown,
    /// Signals that were dropped, with reasons. Data-quality problems are
    /// tolerated but never invisible.
    pub skipped: Vec<SkippedSignal>,
}

/// Run a full backtest: normalize → convert → aggregate.
///
/// Fails fast on structurally invalid input (empty price history,
/// non-positive starting capital, negative or non-finite rates) before any
/// computation. Signal-level malformation never fails the run; it lands in
/// [`BacktestReport::skipped`].
pub fn run_backtest(
    config: &BacktestConfig,
    signals: &[RawSignalRecord],
    bars: &[PriceBar],
) -> Result<BacktestReport, SigreplayError> {
    if bars.is_empty() {
        return Err(SigreplayError::EmptyPriceHistory);
    }
    if !config.starting_capital.is_finite() || config.starting_capital <= 0.0 {
        return Err(SigreplayError::InvalidStartingCapital {
            value: config.starting_capital,
        });
    }
    if !config.fee_rate.is_finite() || config.fee_rate < 0.0 {
        return Err(SigreplayError::InvalidRate {
            name: "fee_rate",
            value: config.fee_rate,
        });
    }
    if !config.slippage_rate.is_finite() || config.slippage_rate < 0.0 {
        return Err(SigreplayError::InvalidRate {
            name: "slippage_rate",
            value: config.slippage_rate,
        });
    }

    let events = normalize_signals(signals);
    let Conversion { trades, skipped } =
        convert_signals(&events, bars, config.fee_rate, config.slippage_rate);

    let metrics = MetricsRecord::compute(&trades, config.starting_capital);
    let equity_curve = build_equity_curve(&trades, config.starting_capital, bars[0].time);
    let drawdown = compute_drawdown(&equity_curve);

    Ok(BacktestReport {
        trades,
        metrics,
        equity_curve,
        drawdown,
        skipped,
    })
}
