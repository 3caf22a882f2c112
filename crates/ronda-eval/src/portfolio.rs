//! Equal-weighted portfolio returns from pair signals.
//!
//! Each pair is a 50% long / 50% short dollar-neutral book. Signals are
//! applied with a one-day lag so a position taken at today's close earns
//! tomorrow's return. The portfolio equity curve is the equal-weighted mean
//! of the per-pair cumulative return curves.

use ronda_traits::types::{Date, DensePrices};
use ronda_traits::{Pair, Result, RondaError, SignalTable};

use crate::metrics::PerformanceSummary;

/// Per-pair and aggregate equity curves over a trading window.
#[derive(Debug, Clone)]
pub struct PortfolioReturns {
    /// Return dates, one shorter than the price window (the first price row
    /// has no prior close).
    pub dates: Vec<Date>,
    /// Pairs in signal-table order.
    pub pairs: Vec<Pair>,
    /// Cumulative return curve per pair, aligned with `dates`.
    pub pair_equity: Vec<Vec<f64>>,
    /// Equal-weighted mean of the pair curves, aligned with `dates`.
    pub portfolio_equity: Vec<f64>,
}

impl PortfolioReturns {
    /// Final cumulative return per pair, in `pairs` order.
    #[must_use]
    pub fn pair_final_returns(&self) -> Vec<(Pair, f64)> {
        self.pairs
            .iter()
            .cloned()
            .zip(
                self.pair_equity
                    .iter()
                    .map(|curve| curve.last().copied().unwrap_or(1.0) - 1.0),
            )
            .collect()
    }

    /// Final cumulative return of the portfolio curve.
    #[must_use]
    pub fn final_return(&self) -> f64 {
        self.portfolio_equity.last().copied().unwrap_or(1.0) - 1.0
    }

    /// Summary statistics of the portfolio curve.
    #[must_use]
    pub fn summary(&self) -> PerformanceSummary {
        PerformanceSummary::from_equity(&self.portfolio_equity)
    }
}

/// Computes per-pair and portfolio equity curves from trading prices and
/// position signals.
///
/// # Errors
///
/// - `InvalidData` if the signal table's dates do not match the price
///   window, or the table has no pairs.
/// - `InsufficientData` if the window has fewer than two price rows.
/// - `SymbolNotFound` if a pair's leg is missing from the prices.
pub fn portfolio_returns(prices: &DensePrices, signals: &SignalTable) -> Result<PortfolioReturns> {
    let n_rows = prices.dates.len();
    if n_rows < 2 {
        return Err(RondaError::InsufficientData(
            "return calculation needs at least 2 price rows".to_string(),
        ));
    }
    if signals.height() != n_rows || signals.dates() != prices.dates.as_slice() {
        return Err(RondaError::InvalidData(
            "signal dates do not match the trading price window".to_string(),
        ));
    }
    let pairs = signals.pairs().to_vec();
    if pairs.is_empty() {
        return Err(RondaError::InvalidData(
            "signal table has no pairs".to_string(),
        ));
    }

    let mut pair_equity = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        let first = prices.series(&pair.first)?;
        let second = prices.series(&pair.second)?;
        let positions = signals.pair_signals(pair)?;

        let mut equity = Vec::with_capacity(n_rows - 1);
        let mut cumulative = 1.0;
        for t in 1..n_rows {
            let ret_first = first[t] / first[t - 1] - 1.0;
            let ret_second = second[t] / second[t - 1] - 1.0;
            let gated = 0.5 * (ret_first - ret_second) * f64::from(positions[t - 1]);
            cumulative *= 1.0 + gated;
            equity.push(cumulative);
        }
        pair_equity.push(equity);
    }

    let n_pairs = pair_equity.len() as f64;
    let portfolio_equity = (0..n_rows - 1)
        .map(|t| pair_equity.iter().map(|curve| curve[t]).sum::<f64>() / n_pairs)
        .collect();

    Ok(PortfolioReturns {
        dates: prices.dates[1..].to_vec(),
        pairs,
        pair_equity,
        portfolio_equity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use ndarray::Array2;

    fn dates(n: usize) -> Vec<Date> {
        (0..n)
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap() + chrono::Duration::days(i as i64)
            })
            .collect()
    }

    fn prices(columns: &[(&str, Vec<f64>)]) -> DensePrices {
        let n_rows = columns[0].1.len();
        let mut values = Array2::<f64>::zeros((n_rows, columns.len()));
        for (col, (_, series)) in columns.iter().enumerate() {
            for (row, &v) in series.iter().enumerate() {
                values[(row, col)] = v;
            }
        }
        DensePrices {
            dates: dates(n_rows),
            symbols: columns.iter().map(|(s, _)| s.to_string()).collect(),
            values,
        }
    }

    fn signal_table(dates: Vec<Date>, pairs: Vec<Pair>, rows: Vec<Vec<i8>>) -> SignalTable {
        SignalTable::new(dates, pairs, rows).unwrap()
    }

    #[test]
    fn test_flat_signals_yield_flat_equity() {
        let table = prices(&[("A", vec![10.0, 11.0, 9.0]), ("B", vec![20.0, 19.0, 21.0])]);
        let signals = signal_table(
            dates(3),
            vec![Pair::new("A", "B")],
            vec![vec![0], vec![0], vec![0]],
        );
        let result = portfolio_returns(&table, &signals).unwrap();
        assert_eq!(result.portfolio_equity, vec![1.0, 1.0]);
        assert_relative_eq!(result.final_return(), 0.0);
    }

    #[test]
    fn test_signal_lag_gates_next_day_return() {
        // Day 0 signal is long; only day 1's return is earned. Day 1's
        // signal is flat, so day 2 earns nothing.
        let table = prices(&[("A", vec![10.0, 11.0, 11.0]), ("B", vec![20.0, 20.0, 30.0])]);
        let signals = signal_table(
            dates(3),
            vec![Pair::new("A", "B")],
            vec![vec![1], vec![0], vec![0]],
        );
        let result = portfolio_returns(&table, &signals).unwrap();
        // Day 1: 0.5 * (0.10 - 0.0) * 1 = 0.05.
        assert_relative_eq!(result.portfolio_equity[0], 1.05, epsilon = 1e-12);
        assert_relative_eq!(result.portfolio_equity[1], 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_short_signal_inverts_spread_return() {
        let table = prices(&[("A", vec![10.0, 11.0]), ("B", vec![20.0, 20.0])]);
        let signals = signal_table(
            dates(2),
            vec![Pair::new("A", "B")],
            vec![vec![-1], vec![0]],
        );
        let result = portfolio_returns(&table, &signals).unwrap();
        assert_relative_eq!(result.portfolio_equity[0], 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_is_mean_of_pair_curves() {
        let table = prices(&[
            ("A", vec![10.0, 11.0]),
            ("B", vec![20.0, 20.0]),
            ("C", vec![50.0, 50.0]),
        ]);
        let signals = signal_table(
            dates(2),
            vec![Pair::new("A", "B"), Pair::new("B", "C")],
            vec![vec![1, 1], vec![0, 0]],
        );
        let result = portfolio_returns(&table, &signals).unwrap();
        // Pair (A, B) earns 5%; pair (B, C) is flat.
        assert_relative_eq!(result.pair_equity[0][0], 1.05, epsilon = 1e-12);
        assert_relative_eq!(result.pair_equity[1][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.portfolio_equity[0], 1.025, epsilon = 1e-12);

        let finals = result.pair_final_returns();
        assert_relative_eq!(finals[0].1, 0.05, epsilon = 1e-12);
        assert_relative_eq!(finals[1].1, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_date_mismatch_rejected() {
        let table = prices(&[("A", vec![10.0, 11.0]), ("B", vec![20.0, 20.0])]);
        let shifted: Vec<Date> = dates(2)
            .into_iter()
            .map(|d| d + chrono::Duration::days(30))
            .collect();
        let signals = signal_table(shifted, vec![Pair::new("A", "B")], vec![vec![0], vec![0]]);
        assert!(matches!(
            portfolio_returns(&table, &signals),
            Err(RondaError::InvalidData(_))
        ));
    }

    #[test]
    fn test_too_short_window_rejected() {
        let table = prices(&[("A", vec![10.0]), ("B", vec![20.0])]);
        let signals = signal_table(dates(1), vec![Pair::new("A", "B")], vec![vec![0]]);
        assert!(matches!(
            portfolio_returns(&table, &signals),
            Err(RondaError::InsufficientData(_))
        ));
    }
}
