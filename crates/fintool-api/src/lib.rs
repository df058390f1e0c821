//! Tool contract for plugin-hosted agent tools
//!
//! This crate defines the seam between an agent host and the tools it can
//! invoke: the [`Tool`] trait with its host-facing descriptor, a
//! [`ToolRegistry`] for lookup by name, and the response envelope the host
//! expects ([`ToolResponse`] / [`error_response`]).

pub mod error;
pub mod registry;
pub mod response;
pub mod tool;

pub use error::{Error, Result};
pub use registry::ToolRegistry;
pub use response::{SourceRef, ToolResponse, error_response};
pub use tool::Tool;
