//! Yahoo Finance agent tool
//!
//! A plugin tool that lets an LLM-driven agent query Yahoo Finance data:
//! quotes, historical prices, options chains, company information, market
//! indices, financial statements, news with a sentiment index, and chart
//! data. Results are held in a per-instance request-result cache so
//! repeated identical requests within the freshness window skip the
//! upstream call.
//!
//! # Architecture
//!
//! - [`tool::YahooFinanceTool`] implements the host's
//!   [`fintool_api::Tool`] contract: descriptor, action dispatch, and the
//!   `{output, sources}` response envelope
//! - [`cache::RequestCache`] keys results by a canonical serialization of
//!   the resolved request arguments
//! - [`source::MarketDataSource`] is the fetch collaborator seam,
//!   implemented by [`api::YahooClient`] in production
//!
//! # Example
//!
//! ```rust,ignore
//! use fintool_yahoo::{ToolConfig, YahooFinanceTool};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ToolConfig::from_value(json!({"cache_expiry_minutes": 5}))?;
//!     let tool = YahooFinanceTool::new(&config)?;
//!
//!     let response = tool.invoke(&json!({"action": "quote", "ticker": "AAPL"})).await;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod request;
pub mod sentiment;
pub mod source;
pub mod tool;

// Re-export main types for convenience
pub use cache::{RequestCache, canonical_key};
pub use config::ToolConfig;
pub use error::{Result, ToolError};
pub use request::ActionRequest;
pub use source::MarketDataSource;
pub use tool::YahooFinanceTool;
