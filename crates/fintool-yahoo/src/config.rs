//! Tool configuration consumed at construction time

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::Level;

const DEFAULT_CACHE_EXPIRY_MINUTES: f64 = 5.0;
const DEFAULT_LOGGING_LEVEL: &str = "INFO";

/// Configuration supplied by the host when the tool instance is created
///
/// Both the snake_case keys of the original plugin and the camelCase keys
/// of the descriptor contract are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Freshness window for cached results, in minutes
    #[serde(alias = "cacheExpiryMinutes", alias = "cache_expiry")]
    pub cache_expiry_minutes: f64,

    /// Logging verbosity: TRACE, DEBUG, INFO, WARN or ERROR
    #[serde(alias = "loggingLevel")]
    pub logging_level: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cache_expiry_minutes: DEFAULT_CACHE_EXPIRY_MINUTES,
            logging_level: DEFAULT_LOGGING_LEVEL.to_string(),
        }
    }
}

impl ToolConfig {
    /// Parse and validate a host configuration blob
    pub fn from_value(config: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(config)
            .map_err(|e| ToolError::ConfigError(format!("invalid tool configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// A negative or non-finite expiry and an unrecognized logging level
    /// are fatal and surfaced immediately.
    pub fn validate(&self) -> Result<()> {
        if !self.cache_expiry_minutes.is_finite() || self.cache_expiry_minutes < 0.0 {
            return Err(ToolError::ConfigError(format!(
                "cache_expiry_minutes must be a non-negative number, got {}",
                self.cache_expiry_minutes
            )));
        }
        self.level()?;
        Ok(())
    }

    /// Freshness window for the request cache
    pub fn expiry(&self) -> Duration {
        Duration::from_secs_f64(self.cache_expiry_minutes.max(0.0) * 60.0)
    }

    /// The configured tracing level
    pub fn level(&self) -> Result<Level> {
        match self.logging_level.to_uppercase().as_str() {
            "TRACE" => Ok(Level::TRACE),
            "DEBUG" => Ok(Level::DEBUG),
            "INFO" => Ok(Level::INFO),
            "WARN" | "WARNING" => Ok(Level::WARN),
            "ERROR" => Ok(Level::ERROR),
            other => Err(ToolError::ConfigError(format!(
                "invalid logging level '{other}'"
            ))),
        }
    }
}
