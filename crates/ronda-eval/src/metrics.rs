//! Headline statistics for a portfolio equity curve.

use ronda_traits::stats::{sample_mean, sample_std};
use serde::Serialize;

/// Annualization factor for daily Sharpe ratios.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Summary statistics computed from a portfolio equity curve.
///
/// The curve is the equal-weighted mean of per-pair cumulative return
/// series, so it starts near 1.0 and `final_return` is its last value minus
/// one. Drawdown, Sharpe, and win rate are computed on the curve's
/// day-over-day differences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// Final cumulative return (last equity value minus one).
    pub final_return: f64,
    /// Largest peak-to-trough decline of the cumulative return series.
    /// Zero or negative.
    pub max_drawdown: f64,
    /// Annualized Sharpe ratio of the daily equity differences. Zero when
    /// the differences have no dispersion.
    pub sharpe_ratio: f64,
    /// Fraction of days with a positive equity difference.
    pub win_rate: f64,
}

impl PerformanceSummary {
    /// Computes summary statistics from an equity curve.
    ///
    /// Curves with fewer than two points have no day-over-day differences;
    /// their Sharpe ratio and win rate are reported as zero.
    #[must_use]
    pub fn from_equity(equity: &[f64]) -> Self {
        if equity.is_empty() {
            return Self {
                final_return: 0.0,
                max_drawdown: 0.0,
                sharpe_ratio: 0.0,
                win_rate: 0.0,
            };
        }

        let final_return = equity[equity.len() - 1] - 1.0;

        let mut peak = f64::NEG_INFINITY;
        let mut max_drawdown: f64 = 0.0;
        for &value in equity {
            let cum = value - 1.0;
            peak = peak.max(cum);
            max_drawdown = max_drawdown.min(cum - peak);
        }

        let diffs: Vec<f64> = equity.windows(2).map(|w| w[1] - w[0]).collect();
        let std = sample_std(&diffs);
        let sharpe_ratio = if std > 0.0 {
            sample_mean(&diffs) / std * TRADING_DAYS_PER_YEAR.sqrt()
        } else {
            0.0
        };
        let win_rate = if diffs.is_empty() {
            0.0
        } else {
            diffs.iter().filter(|&&d| d > 0.0).count() as f64 / diffs.len() as f64
        };

        Self {
            final_return,
            max_drawdown,
            sharpe_ratio,
            win_rate,
        }
    }
}
