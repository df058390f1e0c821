//! Market data source seam
//!
//! The tool talks to Yahoo Finance through this trait so the fetch
//! collaborator stays swappable: production uses [`crate::api::YahooClient`],
//! tests substitute a mock. The cache sits in front of whichever
//! implementation is plugged in and treats its results as opaque.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One OHLCV bar for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteBar {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// Latest quote: the most recent bar plus the close before it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestQuote {
    pub bar: QuoteBar,
    pub previous_close: Option<f64>,
}

/// A news article returned by the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub kind: String,
}

/// Yahoo `{raw, fmt}` numeric wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNum {
    pub raw: Option<f64>,
    pub fmt: Option<String>,
}

/// `assetProfile` module of the quote summary endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetProfile {
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub long_business_summary: Option<String>,
    pub full_time_employees: Option<u64>,
}

/// `price` module of the quote summary endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceInfo {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub market_cap: Option<RawNum>,
    pub regular_market_price: Option<RawNum>,
}

/// `summaryDetail` module of the quote summary endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryDetail {
    pub previous_close: Option<RawNum>,
    pub market_cap: Option<RawNum>,
    pub trailing_pe: Option<RawNum>,
    pub dividend_yield: Option<RawNum>,
}

/// One financial statement history module
///
/// Yahoo names the inner array differently per statement kind; the aliases
/// fold all of them onto one field. Rows stay as raw JSON maps because the
/// set of line items varies by company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementHistory {
    #[serde(
        default,
        alias = "incomeStatementHistory",
        alias = "balanceSheetStatements",
        alias = "cashflowStatements"
    )]
    pub statements: Vec<serde_json::Map<String, Value>>,
}

/// Parsed quote summary, one field per requested module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteSummary {
    pub asset_profile: Option<AssetProfile>,
    pub price: Option<PriceInfo>,
    pub summary_detail: Option<SummaryDetail>,
    pub income_statement_history: Option<StatementHistory>,
    pub income_statement_history_quarterly: Option<StatementHistory>,
    pub balance_sheet_history: Option<StatementHistory>,
    pub balance_sheet_history_quarterly: Option<StatementHistory>,
    pub cashflow_statement_history: Option<StatementHistory>,
    pub cashflow_statement_history_quarterly: Option<StatementHistory>,
}

/// One option contract row from the options chain endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionContract {
    pub contract_symbol: Option<String>,
    pub strike: Option<f64>,
    pub last_price: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    pub implied_volatility: Option<f64>,
}

/// Option chain for one symbol at one expiration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsChain {
    /// All expirations the symbol trades, as UNIX timestamps
    pub expiration_dates: Vec<i64>,
    /// Expiration the calls/puts below belong to
    pub expiration: Option<i64>,
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

/// The external fetch collaborator wrapped by the cache
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Latest quote for a symbol
    async fn latest_quote(&self, symbol: &str) -> Result<LatestQuote>;

    /// Historical bars for a symbol over `range` at `interval` granularity
    async fn range_quotes(&self, symbol: &str, interval: &str, range: &str)
    -> Result<Vec<QuoteBar>>;

    /// Quote summary for a symbol; `modules` is a comma-separated list
    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<QuoteSummary>;

    /// Options chain for a symbol, optionally at a specific expiration
    async fn options_chain(&self, symbol: &str, expiration: Option<i64>) -> Result<OptionsChain>;

    /// News articles matching a symbol or query string
    async fn news(&self, query: &str) -> Result<Vec<NewsItem>>;
}
