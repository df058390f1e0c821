//! Error types for the Yahoo Finance tool

use thiserror::Error;

/// Yahoo Finance tool errors
#[derive(Debug, Error)]
pub enum ToolError {
    /// Configuration rejected at construction
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request parameters failed to parse or validate
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Upstream HTTP endpoint returned a non-success response
    #[error("API error: {0}")]
    ApiError(String),

    /// Yahoo Finance client error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Network or HTTP error (includes request timeouts)
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Convert ToolError to the host contract error
impl From<ToolError> for fintool_api::Error {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::ConfigError(msg) => fintool_api::Error::InitializationFailed(msg),
            other => fintool_api::Error::InvocationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::InvalidParams("missing field `symbol`".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: missing field `symbol`");

        let err = ToolError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "no quote summary returned".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Data not available for AAPL: no quote summary returned"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: fintool_api::Error = ToolError::ConfigError("bad expiry".to_string()).into();
        match err {
            fintool_api::Error::InitializationFailed(msg) => assert_eq!(msg, "bad expiry"),
            other => panic!("unexpected variant: {other}"),
        }

        let err: fintool_api::Error = ToolError::ApiError("HTTP 500".to_string()).into();
        match err {
            fintool_api::Error::InvocationFailed(msg) => assert!(msg.contains("HTTP 500")),
            other => panic!("unexpected variant: {other}"),
        }
    }
}
