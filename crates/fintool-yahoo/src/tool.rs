//! The Yahoo Finance agent tool

use crate::actions;
use crate::api::YahooClient;
use crate::cache::RequestCache;
use crate::config::ToolConfig;
use crate::error::{Result, ToolError};
use crate::request::ActionRequest;
use crate::source::MarketDataSource;
use async_trait::async_trait;
use fintool_api::{Tool, ToolResponse, error_response};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Timeout for upstream fetches; expiring produces a typed network error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Agent tool exposing Yahoo Finance data behind a request-result cache
pub struct YahooFinanceTool {
    source: Arc<dyn MarketDataSource>,
    cache: RequestCache,
}

impl YahooFinanceTool {
    /// Create a tool instance backed by the live Yahoo client
    pub fn new(config: &ToolConfig) -> Result<Self> {
        config.validate()?;
        let source = Arc::new(YahooClient::new(REQUEST_TIMEOUT)?);
        Self::with_source(config, source)
    }

    /// Create a tool instance over a custom data source
    pub fn with_source(config: &ToolConfig, source: Arc<dyn MarketDataSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            cache: RequestCache::new(config.expiry()),
        })
    }

    /// The request cache, exposed so a host can observe entry growth
    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// Invoke the tool with raw host arguments
    ///
    /// Always resolves to the host envelope: fetch and parameter failures
    /// become `{error, sources}` values rather than transport errors.
    pub async fn invoke(&self, args: &Value) -> Value {
        let action = args
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or("<missing>")
            .to_string();
        tracing::info!(%action, "invoking action");
        tracing::debug!(?args, "input arguments");

        match self.try_invoke(args).await {
            Ok(value) => value,
            Err(ToolError::InvalidParams(msg)) if msg.starts_with("Invalid action") => {
                tracing::error!(%msg);
                error_response(msg.clone(), format!("Error: {msg}"))
            }
            Err(e) => {
                tracing::error!(%action, error = %e, "error fetching data");
                error_response(
                    format!("Failed to fetch data for action {action}: {e}"),
                    format!("Error fetching data for action {action}"),
                )
            }
        }
    }

    async fn try_invoke(&self, args: &Value) -> Result<Value> {
        let request = ActionRequest::parse(args)?;
        let canonical = request.to_value()?;

        self.cache
            .fetch_or_get(&canonical, SystemTime::now(), || async {
                tracing::info!(action = request.action(), "fetching data");
                self.dispatch(&request).await.map(Value::from)
            })
            .await
    }

    async fn dispatch(&self, request: &ActionRequest) -> Result<ToolResponse> {
        let source = self.source.as_ref();
        match request {
            ActionRequest::Quote { symbol } => actions::quote::run(source, symbol).await,
            ActionRequest::StockHistory {
                symbol,
                period,
                interval,
            } => actions::history::run(source, symbol, period, interval).await,
            ActionRequest::Options {
                symbol,
                option_type,
                expiration_date,
            } => actions::options::run(source, symbol, *option_type, expiration_date.as_deref()).await,
            ActionRequest::Info { symbol } => actions::info::run(source, symbol).await,
            ActionRequest::MarketIndices { indices } => actions::indices::run(source, indices).await,
            ActionRequest::CompanyFinancials {
                symbol,
                statement,
                period,
            } => actions::financials::run(source, symbol, *statement, *period).await,
            ActionRequest::StockNews { symbol, count } => {
                actions::news::run(source, symbol.as_deref(), *count).await
            }
            ActionRequest::Chart {
                symbol,
                range,
                indicators,
            } => actions::chart::run(source, symbol, range, indicators).await,
        }
    }
}

#[async_trait]
impl Tool for YahooFinanceTool {
    async fn execute(&self, params: Value) -> fintool_api::Result<Value> {
        Ok(self.invoke(&params).await)
    }

    fn name(&self) -> &'static str {
        "yahoo_finance"
    }

    fn description(&self) -> &'static str {
        "Get financial data from Yahoo Finance. You can retrieve stock quotes, \
         historical data, options data, company information, market indices, \
         financial statements, news with sentiment, and chart data for a given \
         ticker symbol."
    }

    fn input_schema(&self) -> Value {
        json!({
            "$id": "https://example.com/agents/tools/yahoofinance/input",
            "title": "Input for the Yahoo Finance tool",
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "The action to perform. Options: quote (get current stock price), stock_history (get historical price data with analysis and formatting), options (get options chain data), info (get company information), market_indices (get market index data), company_financials (get financial statements), stock_news (get latest news with a sentiment index), chart (prepare candlestick/line chart data)",
                    "enum": ["quote", "stock_history", "options", "info", "market_indices", "company_financials", "stock_news", "chart"]
                },
                "ticker": {
                    "type": "string",
                    "description": "The ticker symbol to query (e.g., AAPL for Apple Inc.)"
                },
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol (identical to 'ticker', provided for compatibility)"
                },
                "period": {
                    "type": "string",
                    "description": "Period for historical data: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max; or annual/quarterly for company_financials",
                    "enum": ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max", "annual", "quarterly"]
                },
                "interval": {
                    "type": "string",
                    "description": "Interval for historical data: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo",
                    "enum": ["1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "1d", "5d", "1wk", "1mo", "3mo"]
                },
                "optionType": {
                    "type": "string",
                    "description": "Option type: call or put",
                    "enum": ["call", "put"]
                },
                "expirationDate": {
                    "type": "string",
                    "description": "Expiration date for options in YYYY-MM-DD format"
                },
                "indices": {
                    "type": "array",
                    "items": {
                        "type": "string"
                    },
                    "description": "List of market indices to fetch (e.g., ['^GSPC', '^DJI', '^IXIC'] for S&P 500, Dow Jones, and NASDAQ)"
                },
                "statement": {
                    "type": "string",
                    "description": "Financial statement type to retrieve",
                    "enum": ["income", "balance", "cash", "all"]
                },
                "count": {
                    "type": "integer",
                    "description": "Number of items to retrieve (e.g., news articles)",
                    "minimum": 1,
                    "maximum": 10
                },
                "range": {
                    "type": "string",
                    "description": "Time range for chart data",
                    "enum": ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"]
                },
                "indicators": {
                    "type": "array",
                    "items": {
                        "type": "string"
                    },
                    "description": "Indicator overlays for chart data, e.g. ['SMA_20', 'SMA_50']"
                }
            },
            "required": ["action"]
        })
    }
}
