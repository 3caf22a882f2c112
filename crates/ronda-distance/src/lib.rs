#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Distance-approach pairs trading engine.
//!
//! This crate implements the classic distance approach to statistical
//! arbitrage: pairs are formed over a historical window by minimizing the
//! sum of squared deviations between min-max normalized price series, then
//! traded over a subsequent window by opening positions when the pair spread
//! diverges beyond a threshold and closing them when the spread crosses
//! zero.
//!
//! The engine is exposed two ways:
//! - [`DistanceStrategy`], a stateful engine implementing the
//!   [`PairStrategy`](ronda_traits::PairStrategy) seam, and
//! - [`DistanceProvider`], the capability-registry factory for it.
//!
//! # Example
//!
//! ```ignore
//! use ronda_distance::DistanceStrategy;
//! use ronda_traits::{FormationConfig, PairStrategy};
//!
//! let mut strategy = DistanceStrategy::new();
//! strategy.form_pairs(&formation_prices, &FormationConfig::default())?;
//! strategy.trade_pairs(&trading_prices, 2.0)?;
//! let signals = strategy.signals()?;
//! ```

pub mod formation;
pub mod strategy;
pub mod trading;

pub use formation::{FormedPair, form_pairs};
pub use strategy::{DistanceProvider, DistanceStrategy, ENGINE_NAME};
pub use trading::generate_signals;
