//! Signal generation over a trading window.
//!
//! Trading prices are normalized with the formation-window min-max
//! parameters, so the spread is measured on the same scale the pair was
//! formed on. Positions open when the spread diverges beyond
//! `divergence * formation_spread_std` and close when the spread crosses
//! zero. A bar that closes a position may immediately open the opposite
//! side.

use ronda_traits::types::DensePrices;
use ronda_traits::{Result, SignalTable};

use crate::formation::FormedPair;

/// Generates per-pair position signals over a dense trading-price matrix.
///
/// A pair whose formation spread was degenerate (zero standard deviation)
/// never trades: its signal column stays flat at zero.
///
/// # Errors
///
/// Returns `SymbolNotFound` if a formed pair's leg is missing from the
/// trading table.
pub fn generate_signals(
    prices: &DensePrices,
    formed: &[FormedPair],
    divergence: f64,
) -> Result<SignalTable> {
    let n_rows = prices.dates.len();
    let mut columns: Vec<Vec<i8>> = Vec::with_capacity(formed.len());

    for fp in formed {
        let first = prices.series(&fp.pair.first)?;
        let second = prices.series(&fp.pair.second)?;
        let norm_first = fp.scale_first.apply(&first);
        let norm_second = fp.scale_second.apply(&second);
        let threshold = divergence * fp.spread_std;

        let mut column = Vec::with_capacity(n_rows);
        let mut position: i8 = 0;
        for row in 0..n_rows {
            let spread = norm_first[row] - norm_second[row];

            // Zero-crossing exit before any new entry.
            if position == -1 && spread <= 0.0 {
                position = 0;
            } else if position == 1 && spread >= 0.0 {
                position = 0;
            }

            if position == 0 && threshold > 0.0 {
                if spread > threshold {
                    position = -1;
                } else if spread < -threshold {
                    position = 1;
                }
            }

            column.push(position);
        }
        columns.push(column);
    }

    let values = (0..n_rows)
        .map(|row| columns.iter().map(|col| col[row]).collect())
        .collect();

    SignalTable::new(
        prices.dates.clone(),
        formed.iter().map(|fp| fp.pair.clone()).collect(),
        values,
    )
}
