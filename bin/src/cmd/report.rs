//! Forensic report command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use ronda::report::{ForensicReport, PipelineMetrics, ReportConfig};

/// Builds and prints a forensic report.
///
/// Pipeline metrics come from a caller-supplied JSON file when given;
/// otherwise the bundled example set is used. Either way the metrics are
/// pass-through values and render with `[unverified]` markers.
pub(crate) fn print_report(
    trials: i64,
    account_size: f64,
    risk_fraction: f64,
    commission: f64,
    strategy_name: &str,
    metrics_path: Option<&Path>,
    format: &str,
) -> Result<()> {
    let metrics = match metrics_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading metrics file {}", path.display()))?;
            serde_json::from_str::<PipelineMetrics>(&raw)
                .with_context(|| format!("parsing metrics file {}", path.display()))?
        }
        None => PipelineMetrics::example(),
    };

    let config = ReportConfig {
        strategy_name: strategy_name.to_string(),
        account_size,
        risk_fraction,
        commission_per_trade: commission,
        trials,
    };
    let report = ForensicReport::new(config, metrics);

    match format {
        "text" => print!("{report}"),
        "json" => {
            let doc = serde_json::json!({
                "config": report.config(),
                "metrics": report.metrics(),
                "expected_max_sharpe": report.expected_max_sharpe(),
                "haircut_sharpe": report.haircut_sharpe(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        other => bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}
