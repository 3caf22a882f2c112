//! Common types used throughout the Ronda framework.
//!
//! This module defines the core data structures for representing price
//! histories, trading pairs, sector classifications, formation settings,
//! and generated trading signals.

use std::collections::BTreeMap;
use std::fmt;

use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RondaError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier.
///
/// Symbols identify securities across the Ronda framework. Typically these
/// are ticker symbols like "AAPL" or "MSFT".
pub type Symbol = String;

/// Mapping from symbol to industry/sector classification.
///
/// Used to restrict pair formation to same-sector candidates.
pub type SectorMap = BTreeMap<Symbol, String>;

/// Days between 0001-01-01 (CE) and the Unix epoch.
///
/// Polars stores `Date` columns as days since the Unix epoch while chrono's
/// `from_num_days_from_ce_opt` counts from the common era.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// An unordered pair of securities, stored in formation order.
///
/// The first leg is held long (with weight +0.5) when the pair signal is
/// positive; display follows the `(A, B)` convention.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// First leg symbol.
    pub first: Symbol,
    /// Second leg symbol.
    pub second: Symbol,
}

impl Pair {
    /// Creates a new pair from two leg symbols.
    pub fn new(first: impl Into<Symbol>, second: impl Into<Symbol>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Pair selection method used during formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationMethod {
    /// Smallest sum of squared deviations between normalized price series.
    Standard,
    /// Most zero crossings of the formation spread, re-ranked within the
    /// smallest-SSD candidate pool.
    ZeroCrossing,
    /// Highest formation-spread variance, re-ranked within the smallest-SSD
    /// candidate pool.
    Variance,
}

impl FormationMethod {
    /// Human-readable label used in CLI output and summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::ZeroCrossing => "zero_crossing",
            Self::Variance => "variance",
        }
    }
}

impl fmt::Display for FormationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for the pair formation phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationConfig {
    /// Selection method.
    pub method: FormationMethod,
    /// Number of pairs to select.
    pub num_top: usize,
    /// Size of the smallest-SSD candidate pool used for re-ranking by the
    /// zero-crossing and variance methods. Defaults to `5 * num_top`.
    pub candidate_pool: Option<usize>,
    /// Optional sector restriction: only pairs within the same sector are
    /// considered candidates.
    pub sectors: Option<SectorMap>,
    /// Minimum number of formation observations required.
    pub min_observations: usize,
}

impl FormationConfig {
    /// Effective re-ranking pool size for the given candidate count.
    #[must_use]
    pub fn pool_size(&self, n_candidates: usize) -> usize {
        self.candidate_pool
            .unwrap_or(self.num_top.saturating_mul(5))
            .clamp(self.num_top.min(n_candidates), n_candidates)
    }
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            method: FormationMethod::Standard,
            num_top: 20,
            candidate_pool: None,
            sectors: None,
            min_observations: 20,
        }
    }
}

/// Table of per-pair position signals over a trading window.
///
/// Signal values are `+1` (long the spread: long first leg, short second),
/// `-1` (short the spread), or `0` (flat). Rows are trading dates, columns
/// are pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalTable {
    dates: Vec<Date>,
    pairs: Vec<Pair>,
    values: Vec<Vec<i8>>,
}

impl SignalTable {
    /// Creates a new signal table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the row count does not match the number of
    /// dates or any row width does not match the number of pairs.
    pub fn new(dates: Vec<Date>, pairs: Vec<Pair>, values: Vec<Vec<i8>>) -> Result<Self> {
        if values.len() != dates.len() {
            return Err(RondaError::InvalidData(format!(
                "signal rows ({}) do not match dates ({})",
                values.len(),
                dates.len()
            )));
        }
        if let Some(row) = values.iter().find(|row| row.len() != pairs.len()) {
            return Err(RondaError::InvalidData(format!(
                "signal row width ({}) does not match pairs ({})",
                row.len(),
                pairs.len()
            )));
        }
        Ok(Self {
            dates,
            pairs,
            values,
        })
    }

    /// Trading dates covered by the table.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Pairs covered by the table, in formation order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Number of trading dates.
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// Signal column for a pair, in date order.
    ///
    /// # Errors
    ///
    /// Returns `SymbolNotFound` if the pair is not in the table.
    pub fn pair_signals(&self, pair: &Pair) -> Result<Vec<i8>> {
        let idx = self
            .pairs
            .iter()
            .position(|p| p == pair)
            .ok_or_else(|| RondaError::SymbolNotFound(pair.to_string()))?;
        Ok(self.values.iter().map(|row| row[idx]).collect())
    }

    /// Signal row for a date index, or `None` past the end of the window.
    pub fn row(&self, idx: usize) -> Option<&[i8]> {
        self.values.get(idx).map(Vec::as_slice)
    }

    /// Net sum of all signals across dates and pairs.
    pub fn total_signal(&self) -> i64 {
        self.values
            .iter()
            .flat_map(|row| row.iter())
            .map(|&v| i64::from(v))
            .sum()
    }
}

/// Dense price matrix extracted from a [`PriceTable`].
///
/// Rows are dates in ascending order, columns are symbols. All values are
/// finite; validation happens at extraction time.
#[derive(Debug, Clone)]
pub struct DensePrices {
    /// Dates in ascending order.
    pub dates: Vec<Date>,
    /// Symbols, one per matrix column.
    pub symbols: Vec<Symbol>,
    /// Price values, `dates.len() x symbols.len()`.
    pub values: Array2<f64>,
}

impl DensePrices {
    /// Column index of a symbol.
    ///
    /// # Errors
    ///
    /// Returns `SymbolNotFound` if the symbol is not present.
    pub fn column_index(&self, symbol: &str) -> Result<usize> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .ok_or_else(|| RondaError::SymbolNotFound(symbol.to_string()))
    }

    /// Price series for a symbol, in date order.
    ///
    /// # Errors
    ///
    /// Returns `SymbolNotFound` if the symbol is not present.
    pub fn series(&self, symbol: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(symbol)?;
        Ok(self.values.column(idx).to_vec())
    }
}

/// Container for a time-indexed table of adjusted closing prices.
///
/// `PriceTable` wraps a Polars DataFrame with a `date` column plus one
/// numeric column per symbol. This mirrors the shape of a downloaded
/// adjusted-close panel.
///
/// # Expected Schema
///
/// - `date`: trading date, either a Date column or `YYYY-MM-DD` strings
/// - One column per ticker containing adjusted closing prices
///
/// # Example
///
/// ```no_run
/// use ronda_traits::PriceTable;
/// use polars::prelude::*;
///
/// let df = df! {
///     "date" => &["2024-01-02", "2024-01-03"],
///     "AAPL" => &[185.6, 184.2],
///     "MSFT" => &[370.9, 372.5],
/// }.unwrap();
///
/// let prices = PriceTable::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct PriceTable {
    data: DataFrame,
}

impl PriceTable {
    /// Name of the required date column.
    pub const DATE_COLUMN: &'static str = "date";

    /// Creates a new `PriceTable` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of rows (dates).
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Symbol columns, in table order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.data
            .get_column_names()
            .iter()
            .filter(|s| s.as_str() != Self::DATE_COLUMN)
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a symbol column exists.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == symbol)
    }

    /// Parses the date column into chrono dates.
    ///
    /// Accepts either a native Date column or `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if there is no date column and `InvalidDate`
    /// if any entry cannot be parsed.
    pub fn dates(&self) -> Result<Vec<Date>> {
        let column = self
            .data
            .column(Self::DATE_COLUMN)
            .map_err(|_| RondaError::MissingColumn(Self::DATE_COLUMN.to_string()))?;
        let series = column.as_materialized_series();

        if let Ok(date_series) = series.date() {
            return date_series
                .into_iter()
                .map(|d: Option<i32>| {
                    d.and_then(|days| {
                        Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS)
                    })
                    .ok_or_else(|| RondaError::InvalidDate("null date entry".to_string()))
                })
                .collect();
        }

        if let Ok(str_series) = series.str() {
            return str_series
                .into_iter()
                .map(|s: Option<&str>| {
                    let s = s.ok_or_else(|| {
                        RondaError::InvalidDate("null date entry".to_string())
                    })?;
                    Date::parse_from_str(s, "%Y-%m-%d")
                        .map_err(|_| RondaError::InvalidDate(s.to_string()))
                })
                .collect();
        }

        Err(RondaError::InvalidDate(format!(
            "unsupported date column type: {}",
            series.dtype()
        )))
    }

    /// Adjusted-close series for a symbol, in row order.
    ///
    /// Integer columns are cast to f64.
    ///
    /// # Errors
    ///
    /// Returns `SymbolNotFound` for an unknown column and `InvalidData` for
    /// null entries.
    pub fn close_series(&self, symbol: &str) -> Result<Vec<f64>> {
        let column = self
            .data
            .column(symbol)
            .map_err(|_| RondaError::SymbolNotFound(symbol.to_string()))?;
        let series = column
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        series
            .f64()?
            .into_iter()
            .map(|v| {
                v.ok_or_else(|| {
                    RondaError::InvalidData(format!("null price for symbol {symbol}"))
                })
            })
            .collect()
    }

    /// Extracts a validated dense price matrix sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty table and `InvalidData` if any
    /// price is non-finite.
    pub fn to_dense(&self) -> Result<DensePrices> {
        if self.is_empty() {
            return Err(RondaError::InsufficientData(
                "price table has no rows".to_string(),
            ));
        }

        let dates = self.dates()?;
        let symbols = self.symbols();
        if symbols.is_empty() {
            return Err(RondaError::InvalidData(
                "price table has no symbol columns".to_string(),
            ));
        }

        // Sort rows by date once, reordering every column identically.
        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by_key(|&i| dates[i]);
        let sorted_dates: Vec<Date> = order.iter().map(|&i| dates[i]).collect();

        let mut values = Array2::<f64>::zeros((sorted_dates.len(), symbols.len()));
        for (col, symbol) in symbols.iter().enumerate() {
            let series = self.close_series(symbol)?;
            for (row, &src) in order.iter().enumerate() {
                let v = series[src];
                if !v.is_finite() {
                    return Err(RondaError::InvalidData(format!(
                        "non-finite price for symbol {symbol}"
                    )));
                }
                values[(row, col)] = v;
            }
        }

        Ok(DensePrices {
            dates: sorted_dates,
            symbols,
            values,
        })
    }
}

impl From<DataFrame> for PriceTable {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for PriceTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}
