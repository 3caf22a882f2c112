#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Portfolio evaluation for pairs-trading strategies.
//!
//! Turns per-pair position signals into equal-weighted portfolio equity
//! curves ([`portfolio`]), summarizes an equity curve into headline
//! performance statistics ([`metrics`]), and corrects a nominal Sharpe
//! ratio for multiple-testing selection bias ([`deflation`]).

pub mod deflation;
pub mod metrics;
pub mod portfolio;

pub use deflation::{EULER_MASCHERONI, expected_max_sharpe, haircut_sharpe};
pub use metrics::{PerformanceSummary, TRADING_DAYS_PER_YEAR};
pub use portfolio::{PortfolioReturns, portfolio_returns};
