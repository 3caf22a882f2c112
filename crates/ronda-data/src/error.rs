//! Error types for data loading and output.

use thiserror::Error;

/// Errors raised while reading inputs or writing results.
#[derive(Debug, Error)]
pub enum DataError {
    /// Filesystem error while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the underlying DataFrame engine.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Input file parsed but its content is not usable.
    #[error("invalid data: {0}")]
    Invalid(String),

    /// Error from the core table layer.
    #[error(transparent)]
    Core(#[from] ronda_traits::RondaError),
}

/// Convenience alias for data-layer results.
pub type Result<T> = std::result::Result<T, DataError>;
