//! CSV output for portfolio equity curves.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use ronda_eval::PortfolioReturns;

use crate::error::{DataError, Result};

/// File name of the all-methods comparison curve.
pub const COMPARISON_FILE: &str = "equity_curves_comparison.csv";
/// File name of the per-method long-format curves.
pub const INDIVIDUAL_FILE: &str = "individual_equity_curves.csv";

/// Writes portfolio curves for all methods under `dir`, creating it if
/// needed.
///
/// Two files are produced: a wide comparison table (`date` plus one
/// cumulative-return column per method) and a long-format table
/// (`method,date,return`) with one row per method per day. Returns the two
/// file paths.
///
/// # Errors
///
/// Returns an error if no curves are supplied, the methods' date ranges
/// differ, or a file cannot be written.
pub fn write_equity_curves(
    dir: impl AsRef<Path>,
    curves: &[(String, PortfolioReturns)],
) -> Result<(PathBuf, PathBuf)> {
    let (first, rest) = curves.split_first().ok_or_else(|| {
        DataError::Invalid("no portfolio curves to write".to_string())
    })?;
    for (name, portfolio) in rest {
        if portfolio.dates != first.1.dates {
            return Err(DataError::Invalid(format!(
                "method '{name}' covers a different date range than '{}'",
                first.0
            )));
        }
    }
    fs::create_dir_all(dir.as_ref())?;

    let date_strings: Vec<String> = first
        .1
        .dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    // Wide comparison table: cumulative return (equity - 1) per method.
    let mut columns: Vec<Column> = vec![Column::new("date".into(), date_strings.clone())];
    for (name, portfolio) in curves {
        let returns: Vec<f64> = portfolio.portfolio_equity.iter().map(|e| e - 1.0).collect();
        columns.push(Column::new(name.as_str().into(), returns));
    }
    let mut comparison = DataFrame::new(columns)?;
    let comparison_path = dir.as_ref().join(COMPARISON_FILE);
    write_csv(&comparison_path, &mut comparison)?;

    // Long-format table, one row per method per day.
    let n_days = date_strings.len();
    let mut methods = Vec::with_capacity(curves.len() * n_days);
    let mut dates = Vec::with_capacity(curves.len() * n_days);
    let mut returns = Vec::with_capacity(curves.len() * n_days);
    for (name, portfolio) in curves {
        for (date, equity) in date_strings.iter().zip(&portfolio.portfolio_equity) {
            methods.push(name.clone());
            dates.push(date.clone());
            returns.push(equity - 1.0);
        }
    }
    let mut individual = DataFrame::new(vec![
        Column::new("method".into(), methods),
        Column::new("date".into(), dates),
        Column::new("return".into(), returns),
    ])?;
    let individual_path = dir.as_ref().join(INDIVIDUAL_FILE);
    write_csv(&individual_path, &mut individual)?;

    Ok((comparison_path, individual_path))
}

fn write_csv(path: &Path, frame: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(frame)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ronda_traits::Pair;
    use ronda_traits::types::Date;

    fn portfolio(equity: Vec<f64>) -> PortfolioReturns {
        let dates: Vec<Date> = (0..equity.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 5, 6).unwrap() + chrono::Duration::days(i as i64)
            })
            .collect();
        PortfolioReturns {
            dates,
            pairs: vec![Pair::new("A", "B")],
            pair_equity: vec![equity.clone()],
            portfolio_equity: equity,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ronda-output-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_write_equity_curves() {
        let dir = scratch_dir("ok");
        let curves = vec![
            ("standard".to_string(), portfolio(vec![1.0, 1.02, 1.01])),
            ("variance".to_string(), portfolio(vec![1.0, 0.99, 1.03])),
        ];
        let (comparison, individual) = write_equity_curves(&dir, &curves).unwrap();

        let text = fs::read_to_string(&comparison).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "date,standard,variance");
        assert!(text.contains("2024-05-06"));

        let text = fs::read_to_string(&individual).unwrap();
        assert_eq!(text.lines().next().unwrap(), "method,date,return");
        // One row per method per day.
        assert_eq!(text.lines().count(), 1 + 2 * 3);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            write_equity_curves(scratch_dir("empty"), &[]),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn test_mismatched_dates_rejected() {
        let dir = scratch_dir("mismatch");
        let longer = portfolio(vec![1.0, 1.0, 1.0, 1.0]);
        let curves = vec![
            ("standard".to_string(), portfolio(vec![1.0, 1.0])),
            ("variance".to_string(), longer),
        ];
        assert!(matches!(
            write_equity_curves(&dir, &curves),
            Err(DataError::Invalid(_))
        ));
    }
}
