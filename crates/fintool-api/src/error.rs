//! Error types for the tool contract

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Tool initialization failed (bad configuration, unusable client)
    #[error("Tool initialization failed: {0}")]
    InitializationFailed(String),

    /// Tool invocation failed
    #[error("Tool invocation failed: {0}")]
    InvocationFailed(String),
}
