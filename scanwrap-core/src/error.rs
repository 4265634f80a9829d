//! Error types for scanwrap

use thiserror::Error;

/// Main error type for scanwrap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for scanwrap operations
pub type Result<T> = std::result::Result<T, Error>;
