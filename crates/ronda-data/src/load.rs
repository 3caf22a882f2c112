//! CSV loading for price tables and sector maps.

use std::path::Path;

use polars::prelude::*;
use ronda_traits::types::{Date, PriceTable};
use ronda_traits::SectorMap;

use crate::error::{DataError, Result};

/// Loads a wide price table from CSV.
///
/// The file must have a `date` column (ISO `YYYY-MM-DD` strings or a
/// parsed date dtype) and one numeric column per symbol.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or lacks the
/// `date` column.
pub fn load_price_table(path: impl AsRef<Path>) -> Result<PriceTable> {
    let frame = CsvReadOptions::default()
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;

    if !frame
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == PriceTable::DATE_COLUMN)
    {
        return Err(DataError::Invalid(format!(
            "{} has no '{}' column",
            path.as_ref().display(),
            PriceTable::DATE_COLUMN
        )));
    }
    Ok(PriceTable::new(frame))
}

/// Loads a symbol-to-sector map from a two-column `symbol,sector` CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be read or either column is
/// missing or contains nulls.
pub fn load_sector_map(path: impl AsRef<Path>) -> Result<SectorMap> {
    let frame = CsvReadOptions::default()
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;

    let symbols = frame.column("symbol")?.str()?.clone();
    let sectors = frame.column("sector")?.str()?.clone();

    let mut map = SectorMap::new();
    for (symbol, sector) in symbols.iter().zip(sectors.iter()) {
        match (symbol, sector) {
            (Some(symbol), Some(sector)) => {
                map.insert(symbol.to_string(), sector.to_string());
            }
            _ => {
                return Err(DataError::Invalid(format!(
                    "{} has null symbol or sector entries",
                    path.as_ref().display()
                )));
            }
        }
    }
    Ok(map)
}

/// Splits a price table into formation and trading windows at `split`.
///
/// Rows strictly before `split` form the formation window; rows on or
/// after it form the trading window. The table is sorted by date first.
///
/// # Errors
///
/// Returns an error if the dates cannot be parsed or either window would
/// be empty.
pub fn split_price_table(table: &PriceTable, split: Date) -> Result<(PriceTable, PriceTable)> {
    let frame = table
        .data()
        .sort([PriceTable::DATE_COLUMN], SortMultipleOptions::default())?;
    let sorted = PriceTable::new(frame);
    let dates = sorted.dates()?;

    let cut = dates.partition_point(|d| *d < split);
    if cut == 0 || cut == dates.len() {
        return Err(DataError::Invalid(format!(
            "split date {split} leaves an empty formation or trading window"
        )));
    }

    let frame = sorted.data();
    let formation = frame.slice(0, cut);
    let trading = frame.slice(cut as i64, frame.height() - cut);
    Ok((PriceTable::new(formation), PriceTable::new(trading)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ronda-data-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_price_table() {
        let path = scratch_file(
            "prices.csv",
            "date,AAA,BBB\n2024-01-02,10.0,20.0\n2024-01-03,10.5,19.5\n",
        );
        let table = load_price_table(&path).unwrap();
        assert_eq!(table.symbols(), vec!["AAA".to_string(), "BBB".to_string()]);
        assert_eq!(table.dates().unwrap().len(), 2);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_price_table_without_date_column() {
        let path = scratch_file("nodate.csv", "day,AAA\n2024-01-02,10.0\n");
        assert!(matches!(
            load_price_table(&path),
            Err(DataError::Invalid(_))
        ));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_sector_map() {
        let path = scratch_file(
            "sectors.csv",
            "symbol,sector\nAAA,Tech\nBBB,Financials\nCCC,Tech\n",
        );
        let map = load_sector_map(&path).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["AAA"], "Tech");
        assert_eq!(map["BBB"], "Financials");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_split_price_table() {
        let path = scratch_file(
            "split.csv",
            "date,AAA\n2024-01-02,10.0\n2024-01-03,11.0\n2024-01-04,12.0\n2024-01-05,13.0\n",
        );
        let table = load_price_table(&path).unwrap();
        let split = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let (formation, trading) = split_price_table(&table, split).unwrap();
        assert_eq!(formation.dates().unwrap().len(), 2);
        assert_eq!(trading.dates().unwrap().len(), 2);
        assert_eq!(trading.dates().unwrap()[0], split);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_split_outside_range_rejected() {
        let path = scratch_file("split2.csv", "date,AAA\n2024-01-02,10.0\n2024-01-03,11.0\n");
        let table = load_price_table(&path).unwrap();
        let early = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(matches!(
            split_price_table(&table, early),
            Err(DataError::Invalid(_))
        ));
        fs::remove_file(path).unwrap();
    }
}
