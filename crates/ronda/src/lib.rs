#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core type and trait definitions.
///
/// Re-exports the foundational pieces of the ronda API:
///
/// - [`PriceTable`] - wide table of dated closing prices
/// - [`PairStrategy`] - the two-phase pairs-trading engine seam
/// - [`ProviderRegistry`] / [`Capability`] - runtime engine discovery
pub mod traits {
    pub use ronda_traits::*;
}

// Re-export core traits and types at top level for convenience
pub use ronda_traits::{
    Capability, FormationConfig, FormationMethod, Pair, PairStrategy, PriceTable,
    ProviderRegistry, SectorMap, SignalTable, StrategyProvider, Symbol,
};

// Re-export error types
pub use ronda_traits::{Result, RondaError};

/// Distance-approach pair formation and trading.
///
/// The classic statistical-arbitrage distance approach: pairs are ranked
/// by the sum of squared deviations between min-max normalized price
/// series, optionally re-ranked by zero crossings or spread variance, then
/// traded on divergence beyond a threshold with zero-crossing exits.
pub mod distance {
    pub use ronda_distance::*;
}

/// Portfolio evaluation and Sharpe deflation.
///
/// Equal-weighted portfolio equity curves from pair signals, headline
/// performance statistics, and the expected-maximum-Sharpe correction for
/// multiple-testing selection bias.
pub mod eval {
    pub use ronda_eval::*;
}

/// Forensic strategy report formatting.
///
/// Renders caller-supplied pipeline metrics with explicit `[unverified]`
/// markers alongside the one computed quantity, the multiple-testing
/// Sharpe haircut.
pub mod report {
    pub use ronda_report::*;
}

/// Local CSV data loading and result output.
pub mod data {
    pub use ronda_data::*;
}

use std::sync::Arc;

/// Builds a provider registry with every engine this workspace ships.
///
/// Currently that is the distance engine, registered under `"distance"`.
/// Probing any other name yields [`Capability::Unavailable`] with a reason
/// naming the alternatives.
#[must_use]
pub fn default_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(ronda_distance::DistanceProvider));
    registry
}
