#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Local CSV data loading and result output.
//!
//! Price tables are wide CSVs with a `date` column and one column per
//! symbol; sector maps are two-column `symbol,sector` CSVs. Results are
//! written back out as CSVs so they can be charted with any external tool.

pub mod error;
pub mod load;
pub mod output;

pub use error::DataError;
pub use load::{load_price_table, load_sector_map, split_price_table};
pub use output::write_equity_curves;
