//! The forensic report: caller-supplied metrics plus the deflation math.

use std::fmt;

use ronda_eval::{expected_max_sharpe, haircut_sharpe};
use serde::{Deserialize, Serialize};

/// Pipeline outputs supplied by a caller who ran the real estimators
/// externally.
///
/// None of these values are computed or validated here. Absent fields
/// render as `n/a`; present fields render with an `[unverified]` marker so
/// the report never presents a pass-through number as a result of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineMetrics {
    /// Fractional differencing order that achieved stationarity.
    pub frac_diff_order: Option<f64>,
    /// Correlation of the differenced series to the raw price.
    pub raw_price_correlation: Option<f64>,
    /// Average sample uniqueness from triple-barrier label overlap.
    pub avg_uniqueness: Option<f64>,
    /// Diversity index of the sequential-bootstrap bagging ensemble.
    pub bagging_diversity: Option<f64>,
    /// Name of the top predictive feature under MDA importance.
    pub top_feature: Option<String>,
    /// Mean-decrease-accuracy score of the top feature.
    pub mda_score: Option<f64>,
    /// Sharpe ratio before any multiple-testing adjustment.
    pub nominal_sharpe: Option<f64>,
    /// Deflated Sharpe ratio: probability the true Sharpe exceeds zero.
    pub dsr_probability: Option<f64>,
    /// Average trades per month over the backtest.
    pub monthly_trades: Option<f64>,
}

impl PipelineMetrics {
    /// A worked example metric set from an MES mean-reversion pipeline run.
    #[must_use]
    pub fn example() -> Self {
        Self {
            frac_diff_order: Some(0.38),
            raw_price_correlation: Some(0.89),
            avg_uniqueness: Some(0.82),
            bagging_diversity: Some(0.75),
            top_feature: Some("Engle-Granger Spread Residual".to_string()),
            mda_score: Some(0.18),
            nominal_sharpe: Some(1.95),
            dsr_probability: Some(0.92),
            monthly_trades: Some(4.1),
        }
    }
}

/// Sizing and trial-count parameters for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Strategy name printed in the report header.
    pub strategy_name: String,
    /// Account size in dollars.
    pub account_size: f64,
    /// Fraction of the account risked per trade.
    pub risk_fraction: f64,
    /// Round-trip commission per trade, in dollars.
    pub commission_per_trade: f64,
    /// Number of strategy variants tried; drives the selection-bias
    /// correction.
    pub trials: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            strategy_name: "MES Mean Reversion".to_string(),
            account_size: 5_000.0,
            risk_fraction: 0.01,
            commission_per_trade: 1.0,
            trials: 1,
        }
    }
}

/// A rendered-on-demand forensic report.
///
/// Construction runs the expected-maximum-Sharpe correction; rendering is
/// the [`fmt::Display`] impl.
#[derive(Debug, Clone)]
pub struct ForensicReport {
    config: ReportConfig,
    metrics: PipelineMetrics,
    expected_max_sharpe: f64,
    haircut_sharpe: Option<f64>,
}

impl ForensicReport {
    /// Builds a report, computing the multiple-testing correction for the
    /// configured trial count.
    ///
    /// The correction assumes a zero-mean, unit-variance Sharpe population
    /// across trials. The haircut Sharpe is only available when the caller
    /// supplied a nominal Sharpe to haircut.
    #[must_use]
    pub fn new(config: ReportConfig, metrics: PipelineMetrics) -> Self {
        let expected = expected_max_sharpe(0.0, 1.0, config.trials);
        let haircut = metrics
            .nominal_sharpe
            .map(|nominal| haircut_sharpe(nominal, 0.0, 1.0, config.trials));
        Self {
            config,
            metrics,
            expected_max_sharpe: expected,
            haircut_sharpe: haircut,
        }
    }

    /// The computed expected maximum Sharpe ratio for the trial count.
    #[must_use]
    pub fn expected_max_sharpe(&self) -> f64 {
        self.expected_max_sharpe
    }

    /// The haircut Sharpe ratio, when a nominal Sharpe was supplied.
    #[must_use]
    pub fn haircut_sharpe(&self) -> Option<f64> {
        self.haircut_sharpe
    }

    /// The report's sizing configuration.
    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The caller-supplied metrics.
    #[must_use]
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }
}

fn unverified<T: fmt::Display>(value: Option<T>, f: impl Fn(T) -> String) -> String {
    match value {
        Some(v) => format!("{} [unverified]", f(v)),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for ForensicReport {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = &self.config;
        let m = &self.metrics;
        let risk_dollars = cfg.account_size * cfg.risk_fraction;

        writeln!(out, "FORENSIC STRATEGY REPORT: {}", cfg.strategy_name.to_uppercase())?;
        writeln!(out, "{}", "-".repeat(50))?;
        writeln!(out, "Pipeline: Full AFML (Sequential Bagging + MDA + DSR)")?;
        writeln!(
            out,
            "Account Size: ${:.0} | Risk: {:.0}% (${:.0})",
            cfg.account_size,
            cfg.risk_fraction * 100.0,
            risk_dollars
        )?;
        writeln!(out, "{}", "-".repeat(50))?;
        writeln!(out)?;

        writeln!(out, "1. DATA INTEGRITY & MEMORY")?;
        writeln!(
            out,
            "- FracDiff (d): {}",
            unverified(m.frac_diff_order, |d| format!("{d:.2}"))
        )?;
        writeln!(
            out,
            "- Correlation to Raw Price: {}",
            unverified(m.raw_price_correlation, |c| format!("{c:.2}"))
        )?;
        writeln!(out)?;

        writeln!(out, "2. ENSEMBLE DIVERSITY")?;
        writeln!(
            out,
            "- Avg. Sample Uniqueness: {}",
            unverified(m.avg_uniqueness, |u| format!("{:.2}%", u * 100.0))
        )?;
        writeln!(
            out,
            "- SB Bagging Diversity: {}",
            unverified(m.bagging_diversity, |d| format!("{d:.2}"))
        )?;
        writeln!(out)?;

        writeln!(out, "3. FEATURE SIGNIFICANCE")?;
        writeln!(
            out,
            "- Top Predictive Feature: {}",
            unverified(m.top_feature.as_deref(), str::to_string)
        )?;
        writeln!(
            out,
            "- MDA Importance Score: {}",
            unverified(m.mda_score, |s| format!("{s:.4}"))
        )?;
        writeln!(out)?;

        writeln!(out, "4. PERFORMANCE VALIDATION")?;
        writeln!(out, "- Total Trials Performed: {}", cfg.trials)?;
        writeln!(
            out,
            "- Nominal Sharpe Ratio: {}",
            unverified(m.nominal_sharpe, |s| format!("{s:.2}"))
        )?;
        writeln!(
            out,
            "- 'Luck' Threshold (E[max SR]): {:.2}",
            self.expected_max_sharpe
        )?;
        match self.haircut_sharpe {
            Some(haircut) => writeln!(out, "- Haircut Sharpe Ratio: {haircut:.2}")?,
            None => writeln!(out, "- Haircut Sharpe Ratio: n/a")?,
        }
        writeln!(
            out,
            "- Deflated Sharpe (DSR): {} Prob. of Skill",
            unverified(m.dsr_probability, |p| format!("{:.2}%", p * 100.0))
        )?;
        writeln!(out)?;

        writeln!(out, "5. BACKTEST CONSTRAINTS")?;
        writeln!(
            out,
            "- Monthly Frequency: {} trades",
            unverified(m.monthly_trades, |t| format!("{t:.1}"))
        )?;
        writeln!(
            out,
            "- Transaction Costs: ${:.2} per round trip",
            cfg.commission_per_trade
        )?;
        writeln!(out, "{}", "-".repeat(50))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_trial_has_no_correction() {
        let report = ForensicReport::new(ReportConfig::default(), PipelineMetrics::example());
        assert_relative_eq!(report.expected_max_sharpe(), 0.0);
        assert_relative_eq!(report.haircut_sharpe().unwrap(), 1.95);
    }

    #[test]
    fn test_five_trials_haircut() {
        let config = ReportConfig {
            trials: 5,
            ..ReportConfig::default()
        };
        let report = ForensicReport::new(config, PipelineMetrics::example());
        assert_relative_eq!(report.expected_max_sharpe(), 1.192_594_001_0, epsilon = 1e-6);
        assert_relative_eq!(
            report.haircut_sharpe().unwrap(),
            1.95 - 1.192_594_001_0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_missing_nominal_sharpe_has_no_haircut() {
        let metrics = PipelineMetrics {
            nominal_sharpe: None,
            ..PipelineMetrics::example()
        };
        let report = ForensicReport::new(ReportConfig::default(), metrics);
        assert!(report.haircut_sharpe().is_none());
        assert!(report.to_string().contains("Haircut Sharpe Ratio: n/a"));
    }

    #[test]
    fn test_rendering_marks_supplied_metrics_unverified() {
        let config = ReportConfig {
            trials: 5,
            ..ReportConfig::default()
        };
        let rendered = ForensicReport::new(config, PipelineMetrics::example()).to_string();

        assert!(rendered.contains("FORENSIC STRATEGY REPORT: MES MEAN REVERSION"));
        assert!(rendered.contains("Account Size: $5000 | Risk: 1% ($50)"));
        assert!(rendered.contains("- FracDiff (d): 0.38 [unverified]"));
        assert!(rendered.contains("- Avg. Sample Uniqueness: 82.00% [unverified]"));
        assert!(rendered.contains("Engle-Granger Spread Residual [unverified]"));
        assert!(rendered.contains("- Total Trials Performed: 5"));
        assert!(rendered.contains("- Nominal Sharpe Ratio: 1.95 [unverified]"));
        // Computed values carry no marker.
        assert!(rendered.contains("- 'Luck' Threshold (E[max SR]): 1.19"));
        assert!(rendered.contains("- Haircut Sharpe Ratio: 0.76"));
        assert!(rendered.contains("- Monthly Frequency: 4.1 trades [unverified]"));
    }

    #[test]
    fn test_absent_metrics_render_as_na() {
        let report = ForensicReport::new(ReportConfig::default(), PipelineMetrics::default());
        let rendered = report.to_string();
        assert!(rendered.contains("- FracDiff (d): n/a"));
        assert!(rendered.contains("- Top Predictive Feature: n/a"));
        assert!(!rendered.contains("[unverified] [unverified]"));
    }

    #[test]
    fn test_metrics_deserialize_with_defaults() {
        let metrics: PipelineMetrics =
            serde_json::from_str(r#"{"nominal_sharpe": 2.1, "mda_score": 0.3}"#).unwrap();
        assert_relative_eq!(metrics.nominal_sharpe.unwrap(), 2.1);
        assert_relative_eq!(metrics.mda_score.unwrap(), 0.3);
        assert!(metrics.top_feature.is_none());
    }
}
