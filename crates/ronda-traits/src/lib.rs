#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type and trait definitions for the Ronda statistical arbitrage framework.
//!
//! This crate provides the foundational abstractions for building pairs-trading
//! research workflows: price containers, pair formation configuration, trading
//! signal tables, the pluggable [`PairStrategy`] seam, and the capability probe
//! used to discover strategy engines at runtime.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod capability;
pub mod error;
pub mod stats;
pub mod strategy;
pub mod types;

// Re-exports
pub use capability::{Capability, ProviderRegistry, StrategyProvider};
pub use error::{Result, RondaError};
pub use strategy::PairStrategy;
pub use types::{
    Date, FormationConfig, FormationMethod, Pair, PriceTable, SectorMap, SignalTable, Symbol,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
