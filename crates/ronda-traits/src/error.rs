//! Error types for the Ronda framework.
//!
//! This module defines the error types used throughout the Ronda ecosystem,
//! covering pair formation, signal generation, data validation, and
//! capability probing.

use thiserror::Error;

/// The main error type for Ronda operations.
///
/// This enum encompasses all error cases that can occur when working with
/// price tables, pair strategies, and evaluation results.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a symbol is not found in the universe.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error when a requested strategy capability is not registered.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Error when pair accessors are called before formation has run.
    #[error("Pairs not formed: {0}")]
    PairsNotFormed(String),

    /// Error when signal accessors are called before trading has run.
    #[error("Signals not ready: {0}")]
    SignalsNotReady(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Ronda operations.
///
/// This is a convenience type that uses [`RondaError`] as the error type.
pub type Result<T> = std::result::Result<T, RondaError>;
