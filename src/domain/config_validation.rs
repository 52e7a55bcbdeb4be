//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::SigreplayError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SigreplayError> {
    validate_starting_capital(config)?;
    validate_rate(config, "fee_rate")?;
    validate_rate(config, "slippage_rate")?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), SigreplayError> {
    validate_path(config, "bars")?;
    validate_path(config, "signals")?;
    Ok(())
}

fn validate_starting_capital(config: &dyn ConfigPort) -> Result<(), SigreplayError> {
    if config.get_string("backtest", "starting_capital").is_none() {
        return Err(SigreplayError::ConfigMissing {
            section: "backtest".to_string(),
            key: "starting_capital".to_string(),
        });
    }
    let value = config.get_double("backtest", "starting_capital", 0.0);
    if value <= 0.0 {
        return Err(SigreplayError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "starting_capital".to_string(),
            reason: "starting_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_rate(config: &dyn ConfigPort, key: &str) -> Result<(), SigreplayError> {
    let value = config.get_double("backtest", key, 0.0);
    // rates are fractions of price, not percents
    if !(0.0..1.0).contains(&value) {
        return Err(SigreplayError::ConfigInvalid {
            section: "backtest".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a fraction in [0, 1)"),
        });
    }
    Ok(())
}

fn validate_path(config: &dyn ConfigPort, key: &str) -> Result<(), SigreplayError> {
    match config.get_string("data", key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SigreplayError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        }),
    }
}
