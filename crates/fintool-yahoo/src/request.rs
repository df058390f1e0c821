//! Typed request parsing
//!
//! Raw host arguments are parsed into [`ActionRequest`] before anything
//! else happens: defaults are filled in, `ticker` is accepted as an alias
//! of `symbol`, and symbols are uppercased. The re-serialization of the
//! resolved request is what the cache canonicalizes, so two spellings of
//! the same request share one entry.

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actions the tool understands, in descriptor order
pub const ACTIONS: [&str; 8] = [
    "quote",
    "stock_history",
    "options",
    "info",
    "market_indices",
    "company_financials",
    "stock_news",
    "chart",
];

/// Default market indices: S&P 500, Dow Jones, NASDAQ
pub fn default_indices() -> Vec<String> {
    vec![
        "^GSPC".to_string(),
        "^DJI".to_string(),
        "^IXIC".to_string(),
    ]
}

fn default_period() -> String {
    "1mo".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_count() -> u32 {
    5
}

fn default_chart_range() -> String {
    "3mo".to_string()
}

/// Option side filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Call,
    Put,
}

/// Financial statement kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    #[default]
    Income,
    Balance,
    Cash,
    All,
}

/// Reporting period for financial statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialPeriod {
    #[default]
    Annual,
    Quarterly,
}

/// One resolved tool request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    Quote {
        #[serde(alias = "ticker")]
        symbol: String,
    },
    StockHistory {
        #[serde(alias = "ticker")]
        symbol: String,
        #[serde(default = "default_period")]
        period: String,
        #[serde(default = "default_interval")]
        interval: String,
    },
    Options {
        #[serde(alias = "ticker")]
        symbol: String,
        #[serde(rename = "optionType", default)]
        option_type: Option<OptionSide>,
        #[serde(rename = "expirationDate", default)]
        expiration_date: Option<String>,
    },
    Info {
        #[serde(alias = "ticker")]
        symbol: String,
    },
    MarketIndices {
        #[serde(default = "default_indices")]
        indices: Vec<String>,
    },
    CompanyFinancials {
        #[serde(alias = "ticker")]
        symbol: String,
        #[serde(default)]
        statement: StatementKind,
        #[serde(default)]
        period: FinancialPeriod,
    },
    StockNews {
        #[serde(default, alias = "ticker")]
        symbol: Option<String>,
        #[serde(default = "default_count")]
        count: u32,
    },
    Chart {
        #[serde(alias = "ticker")]
        symbol: String,
        #[serde(default = "default_chart_range")]
        range: String,
        #[serde(default)]
        indicators: Vec<String>,
    },
}

impl ActionRequest {
    /// Parse raw host arguments into a resolved request
    pub fn parse(args: &Value) -> Result<Self> {
        let action = args
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidParams("missing required parameter: action".into()))?;
        if !ACTIONS.contains(&action) {
            return Err(ToolError::InvalidParams(format!("Invalid action: {action}")));
        }

        // Integer-valued floats are accepted wherever integers are
        let request: Self = serde_json::from_value(crate::cache::normalize(args)).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("missing field `symbol`") {
                ToolError::InvalidParams("missing required parameter: symbol or ticker".to_string())
            } else {
                ToolError::InvalidParams(msg)
            }
        })?;

        Ok(request.resolved())
    }

    /// The action name this request carries
    pub fn action(&self) -> &'static str {
        match self {
            Self::Quote { .. } => "quote",
            Self::StockHistory { .. } => "stock_history",
            Self::Options { .. } => "options",
            Self::Info { .. } => "info",
            Self::MarketIndices { .. } => "market_indices",
            Self::CompanyFinancials { .. } => "company_financials",
            Self::StockNews { .. } => "stock_news",
            Self::Chart { .. } => "chart",
        }
    }

    /// The request as a JSON value, suitable for cache canonicalization
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn resolved(mut self) -> Self {
        match &mut self {
            Self::Quote { symbol }
            | Self::StockHistory { symbol, .. }
            | Self::Options { symbol, .. }
            | Self::Info { symbol }
            | Self::CompanyFinancials { symbol, .. }
            | Self::Chart { symbol, .. } => {
                *symbol = symbol.to_uppercase();
            }
            Self::MarketIndices { indices } => {
                for index in indices.iter_mut() {
                    *index = index.to_uppercase();
                }
            }
            Self::StockNews { symbol, count } => {
                if let Some(symbol) = symbol.as_mut() {
                    *symbol = symbol.to_uppercase();
                }
                *count = (*count).min(10);
            }
        }
        self
    }
}
