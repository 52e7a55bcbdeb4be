//! Aggregate performance metrics.

use super::trade::Trade;

/// Aggregate statistics over a completed trade list.
///
/// Recomputed from scratch on every call — nothing is incrementally
/// updated between runs, so repeated computation cannot drift. An empty
/// trade list yields the all-zero default record, never an absent one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsRecord {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent of trades with positive net profit.
    pub win_rate: f64,
    /// `100 - win_rate`; breakeven trades land on this side.
    pub loss_rate: f64,
    /// Mean net profit of winning trades.
    pub avg_win: f64,
    /// Mean absolute net profit of losing trades.
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    /// Gross win sum over gross loss sum. +∞ with wins and no losses,
    /// 0 when there are neither.
    pub profit_factor: f64,
    /// Expected net profit per trade given historical rates and averages.
    pub expectancy: f64,
    /// Mean over population standard deviation of per-trade profit
    /// percentages. A per-trade dispersion statistic — not annualized and
    /// not excess-return based, so not a textbook Sharpe ratio.
    pub sharpe_ratio: f64,
    pub total_net_profit: f64,
    /// Total return on starting capital, in percent.
    pub total_return_percent: f64,
    pub avg_holding_ms: f64,
    /// Trades per calendar day between first entry and last exit.
    pub trades_per_day: f64,
}

impl MetricsRecord {
    pub fn compute(trades: &[Trade], starting_capital: f64) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let mut winning_trades = 0usize;
        let mut losing_trades = 0usize;
        let mut gross_win_sum = 0.0_f64;
        let mut gross_loss_sum = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_net_profit = 0.0_f64;
        let mut total_holding_ms = 0i64;

        for trade in trades {
            let net = trade.net_profit;
            total_net_profit += net;
            total_holding_ms += trade.holding_duration_ms;

            if trade.is_win() {
                winning_trades += 1;
                gross_win_sum += net;
                if net > largest_win {
                    largest_win = net;
                }
            } else if trade.is_loss() {
                losing_trades += 1;
                gross_loss_sum += net.abs();
                if net.abs() > largest_loss {
                    largest_loss = net.abs();
                }
            }
        }

        let total_trades = trades.len();
        let win_rate = winning_trades as f64 / total_trades as f64 * 100.0;
        let loss_rate = 100.0 - win_rate;

        let avg_win = if winning_trades > 0 {
            gross_win_sum / winning_trades as f64
        } else {
            0.0
        };
        let avg_loss = if losing_trades > 0 {
            gross_loss_sum / losing_trades as f64
        } else {
            0.0
        };

        let profit_factor = if gross_loss_sum > 0.0 {
            gross_win_sum / gross_loss_sum
        } else if gross_win_sum > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let expectancy = (win_rate / 100.0) * avg_win - (loss_rate / 100.0) * avg_loss;

        let sharpe_ratio = per_trade_sharpe(trades);

        let total_return_percent = if starting_capital > 0.0 {
            total_net_profit / starting_capital * 100.0
        } else {
            0.0
        };

        let avg_holding_ms = total_holding_ms as f64 / total_trades as f64;
        let trades_per_day = trade_frequency(trades);

        MetricsRecord {
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            loss_rate,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            profit_factor,
            expectancy,
            sharpe_ratio,
            total_net_profit,
            total_return_percent,
            avg_holding_ms,
            trades_per_day,
        }
    }
}

fn per_trade_sharpe(trades: &[Trade]) -> f64 {
    let n = trades.len() as f64;
    let mean = trades.iter().map(|t| t.profit_percent).sum::<f64>() / n;
    let variance = trades
        .iter()
        .map(|t| (t.profit_percent - mean).powi(2))
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 { mean / stddev } else { 0.0 }
}

/// Trades divided by the whole-day span between the first entry's and the
/// last exit's UTC calendar dates; 0 when the span is 0.
fn trade_frequency(trades: &[Trade]) -> f64 {
    let (Some(first), Some(last)) = (trades.first(), trades.last()) else {
        return 0.0;
    };
    let span_days = (last.exit_time.date_naive() - first.entry_time.date_naive()).num_days();
    if span_days > 0 {
        trades.len() as f64 / span_days as f64
    } else {
        0.0
    }
}
