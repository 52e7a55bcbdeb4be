//! Concrete adapter implementations for ports.

pub mod csv_bar_adapter;
pub mod file_config_adapter;
pub mod json_signal_adapter;
