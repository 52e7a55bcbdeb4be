//! Data access port traits.
//!
//! Bars and signals arrive as complete batches from different sources, so
//! each gets its own trait. Both fetch the whole batch up front; nothing in
//! the domain performs I/O mid-run.

use crate::domain::bar::PriceBar;
use crate::domain::error::SigreplayError;
use crate::domain::signal::RawSignalRecord;

pub trait BarSource {
    fn fetch_bars(&self) -> Result<Vec<PriceBar>, SigreplayError>;
}

pub trait SignalSource {
    fn fetch_signals(&self) -> Result<Vec<RawSignalRecord>, SigreplayError>;
}
