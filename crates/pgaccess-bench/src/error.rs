//! Benchmark error types.

use thiserror::Error;

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Benchmark errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The ORM connection could not be established.
    #[error("connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// ORM statement failure.
    #[error("orm error: {0}")]
    Orm(#[from] diesel::result::Error),

    /// Driver statement, pool or COPY failure.
    #[error("driver error: {0}")]
    Driver(#[from] sqlx::Error),

    /// Tokio runtime construction failure.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
