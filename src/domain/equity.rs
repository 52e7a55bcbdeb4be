//! Equity curve and drawdown.

use chrono::{DateTime, Utc};

use super::trade::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub time: DateTime<Utc>,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawdownPoint {
    pub time: DateTime<Utc>,
    /// Decline from the running peak, in capital units.
    pub drawdown: f64,
    pub drawdown_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawdown {
    pub series: Vec<DrawdownPoint>,
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
}

/// Anchor the curve at the first bar's time with the starting capital, then
/// add one point per trade at its exit time with the cumulative capital.
/// The result always has `trades.len() + 1` points.
pub fn build_equity_curve(
    trades: &[Trade],
    starting_capital: f64,
    first_bar_time: DateTime<Utc>,
) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(trades.len() + 1);
    curve.push(EquityPoint {
        time: first_bar_time,
        equity: starting_capital,
    });

    let mut equity = starting_capital;
    for trade in trades {
        equity += trade.net_profit;
        curve.push(EquityPoint {
            time: trade.exit_time,
            equity,
        });
    }

    curve
}

/// Single forward pass tracking the running peak. Emits one point per
/// equity point; the percent guard against a non-positive peak is
/// unreachable while starting capital is positive but kept for safety.
pub fn compute_drawdown(curve: &[EquityPoint]) -> Drawdown {
    let mut series = Vec::with_capacity(curve.len());
    let mut max_drawdown = 0.0_f64;
    let mut max_drawdown_percent = 0.0_f64;

    let Some(first) = curve.first() else {
        return Drawdown {
            series,
            max_drawdown,
            max_drawdown_percent,
        };
    };

    let mut peak = first.equity;
    for point in curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let drawdown = peak - point.equity;
        let drawdown_percent = if peak > 0.0 {
            drawdown / peak * 100.0
        } else {
            0.0
        };
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
            max_drawdown_percent = drawdown_percent;
        }
        series.push(DrawdownPoint {
            time: point.time,
            drawdown,
            drawdown_percent,
        });
    }

    Drawdown {
        series,
        max_drawdown,
        max_drawdown_percent,
    }
}
