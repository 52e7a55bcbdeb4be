//! Maximum adverse/favorable excursion.

use super::bar::PriceBar;
use super::trade::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Excursion {
    pub mae: f64,
    pub mfe: f64,
}

/// Scan every bar in the trade's inclusive entry..exit span and track the
/// worst unrealized loss and best unrealized gain against the entry price.
///
/// Both maxima start at 0, so a trade that never went underwater reports
/// `mae == 0` rather than a negative value. Out-of-range indices clamp to
/// the last bar. O(span) per trade.
pub fn compute_excursion(
    bars: &[PriceBar],
    entry_bar: usize,
    exit_bar: usize,
    direction: Direction,
    entry_price: f64,
) -> Excursion {
    let mut excursion = Excursion::default();
    if bars.is_empty() {
        return excursion;
    }

    let start = entry_bar.min(bars.len() - 1);
    let end = exit_bar.min(bars.len() - 1).max(start);

    for bar in &bars[start..=end] {
        let (adverse, favorable) = match direction {
            Direction::Long => (entry_price - bar.low, bar.high - entry_price),
            Direction::Short => (bar.high - entry_price, entry_price - bar.low),
        };
        if adverse > excursion.mae {
            excursion.mae = adverse;
        }
        if favorable > excursion.mfe {
            excursion.mfe = favorable;
        }
    }

    excursion
}
