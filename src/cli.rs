//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_bar_adapter::CsvBarAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_signal_adapter::JsonSignalAdapter;
use crate::domain::config_validation::{validate_backtest_config, validate_data_config};
use crate::domain::convert::SkipReason;
use crate::domain::engine::{BacktestConfig, BacktestReport, run_backtest};
use crate::domain::error::SigreplayError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::{BarSource, SignalSource};

#[derive(Parser, Debug)]
#[command(name = "sigreplay", about = "Signal replay backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a signal batch against price bars
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Bars CSV, overrides [data] bars from the config
        #[arg(long)]
        bars: Option<PathBuf>,
        /// Signals JSON, overrides [data] signals from the config
        #[arg(long)]
        signals: Option<PathBuf>,
        /// Validate config and inputs without running
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a config file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the time range of a bars file
    Info {
        #[arg(long)]
        bars: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            bars,
            signals,
            dry_run,
        } => run_backtest_cmd(&config, bars.as_ref(), signals.as_ref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { bars } => run_info(&bars),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigreplayError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Read engine parameters from the `[backtest]` section.
/// `starting_capital` is required; the rates default to 0.
pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, SigreplayError> {
    validate_backtest_config(config)?;
    Ok(BacktestConfig {
        starting_capital: config.get_double("backtest", "starting_capital", 0.0),
        fee_rate: config.get_double("backtest", "fee_rate", 0.0),
        slippage_rate: config.get_double("backtest", "slippage_rate", 0.0),
    })
}

/// Resolve bars/signals paths: CLI flags win over the `[data]` section.
pub fn resolve_data_paths(
    config: &dyn ConfigPort,
    bars_override: Option<&PathBuf>,
    signals_override: Option<&PathBuf>,
) -> Result<(PathBuf, PathBuf), SigreplayError> {
    let bars = match bars_override {
        Some(path) => path.clone(),
        None => config
            .get_string("data", "bars")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| SigreplayError::ConfigMissing {
                section: "data".to_string(),
                key: "bars".to_string(),
            })?,
    };
    let signals = match signals_override {
        Some(path) => path.clone(),
        None => config
            .get_string("data", "signals")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| SigreplayError::ConfigMissing {
                section: "data".to_string(),
                key: "signals".to_string(),
            })?,
    };
    Ok((bars, signals))
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    bars_override: Option<&PathBuf>,
    signals_override: Option<&PathBuf>,
    dry_run: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let engine_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // flags can stand in for [data]; resolve_data_paths reports whichever
    // path is still missing
    let (bars_path, signals_path) =
        match resolve_data_paths(&adapter, bars_override, signals_override) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

    if dry_run {
        eprintln!("Config OK");
        eprintln!("  bars:    {}", bars_path.display());
        eprintln!("  signals: {}", signals_path.display());
        return ExitCode::SUCCESS;
    }

    eprintln!("Loading bars from {}", bars_path.display());
    let bars = match CsvBarAdapter::new(bars_path).fetch_bars() {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading signals from {}", signals_path.display());
    let signals = match JsonSignalAdapter::new(signals_path).fetch_signals() {
        Ok(signals) => signals,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Replaying {} signals against {} bars",
        signals.len(),
        bars.len()
    );
    match run_backtest(&engine_config, &signals, &bars) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let result = validate_backtest_config(&adapter).and_then(|_| validate_data_config(&adapter));
    match result {
        Ok(()) => {
            println!("Config OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(bars_path: &PathBuf) -> ExitCode {
    match CsvBarAdapter::new(bars_path.clone()).fetch_bars() {
        Ok(bars) => {
            match (bars.first(), bars.last()) {
                (Some(first), Some(last)) => {
                    println!("{} bars, {} .. {}", bars.len(), first.time, last.time);
                }
                _ => println!("0 bars"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn skip_reason_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::MissingTime => "missing time",
        SkipReason::MissingPrice => "missing price",
        SkipReason::NonPositivePrice => "non-positive price",
        SkipReason::IgnorableKind => "non-actionable kind",
    }
}

fn print_summary(report: &BacktestReport) {
    let m = &report.metrics;
    println!("{}", "=".repeat(50));
    println!("  BACKTEST RESULTS");
    println!("{}", "=".repeat(50));
    println!("  Trades:            {:>12}", m.total_trades);
    println!("  Win rate:          {:>11.2}%", m.win_rate);
    println!("  Profit factor:     {:>12.2}", m.profit_factor);
    println!("  Expectancy:        {:>12.2}", m.expectancy);
    println!("  Sharpe (per-trade):{:>12.2}", m.sharpe_ratio);
    println!("  Net profit:        {:>12.2}", m.total_net_profit);
    println!("  Total return:      {:>11.2}%", m.total_return_percent);
    println!("  Max drawdown:      {:>12.2}", report.drawdown.max_drawdown);
    println!(
        "  Max drawdown:      {:>11.2}%",
        report.drawdown.max_drawdown_percent
    );

    if !report.skipped.is_empty() {
        println!("  Skipped signals:   {:>12}", report.skipped.len());
        let mut counts: Vec<(SkipReason, usize)> = Vec::new();
        for skip in &report.skipped {
            match counts.iter_mut().find(|(reason, _)| *reason == skip.reason) {
                Some((_, count)) => *count += 1,
                None => counts.push((skip.reason, 1)),
            }
        }
        for (reason, count) in counts {
            println!("    {:<20} {count}", skip_reason_label(reason));
        }
    }
}
