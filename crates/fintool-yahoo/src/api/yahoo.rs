//! Yahoo Finance API client
//!
//! Quotes, history and news go through the `yahoo_finance_api` connector;
//! quote summaries and option chains come from Yahoo's query endpoints via
//! `reqwest` since the connector does not cover them. Every upstream call
//! is gated by a direct rate limiter.

use crate::error::{Result, ToolError};
use crate::source::{
    LatestQuote, MarketDataSource, NewsItem, OptionContract, OptionsChain, QuoteBar, QuoteSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use yahoo_finance_api as yahoo;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const QUERY_BASE: &str = "https://query2.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
const REQUESTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(60).unwrap();

/// Yahoo Finance client
pub struct YahooClient {
    connector: yahoo::YahooConnector,
    http: reqwest::Client,
    limiter: SharedRateLimiter,
}

impl YahooClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| ToolError::YahooFinanceError(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(REQUESTS_PER_MINUTE)));

        Ok(Self {
            connector,
            http,
            limiter,
        })
    }

    fn map_bar(symbol: &str, quote: &yahoo::Quote) -> QuoteBar {
        QuoteBar {
            symbol: symbol.to_string(),
            timestamp: DateTime::from_timestamp(quote.timestamp as i64, 0).unwrap_or_else(Utc::now),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            adjclose: quote.adjclose,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.limiter.until_ready().await;

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::ApiError(format!(
                "Yahoo query endpoint returned {status}: {body}"
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn latest_quote(&self, symbol: &str) -> Result<LatestQuote> {
        self.limiter.until_ready().await;

        let response = self
            .connector
            .get_quote_range(symbol, "1d", "5d")
            .await
            .map_err(|e| ToolError::YahooFinanceError(e.to_string()))?;
        let quotes = response
            .quotes()
            .map_err(|e| ToolError::YahooFinanceError(e.to_string()))?;

        let Some(last) = quotes.last() else {
            return Err(ToolError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no recent quotes returned".to_string(),
            });
        };
        let previous_close = (quotes.len() >= 2).then(|| quotes[quotes.len() - 2].close);

        Ok(LatestQuote {
            bar: Self::map_bar(symbol, last),
            previous_close,
        })
    }

    async fn range_quotes(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<QuoteBar>> {
        self.limiter.until_ready().await;

        let response = self
            .connector
            .get_quote_range(symbol, interval, range)
            .await
            .map_err(|e| ToolError::YahooFinanceError(e.to_string()))?;
        let quotes = response
            .quotes()
            .map_err(|e| ToolError::YahooFinanceError(e.to_string()))?;

        Ok(quotes.iter().map(|q| Self::map_bar(symbol, q)).collect())
    }

    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<QuoteSummary> {
        let url = format!("{QUERY_BASE}/v10/finance/quoteSummary/{symbol}?modules={modules}");
        let envelope: QuoteSummaryEnvelope = self.get_json(&url).await?;

        envelope
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "empty quote summary result".to_string(),
            })
    }

    async fn options_chain(&self, symbol: &str, expiration: Option<i64>) -> Result<OptionsChain> {
        let url = match expiration {
            Some(date) => format!("{QUERY_BASE}/v7/finance/options/{symbol}?date={date}"),
            None => format!("{QUERY_BASE}/v7/finance/options/{symbol}"),
        };
        let envelope: OptionsEnvelope = self.get_json(&url).await?;

        let Some(entry) = envelope
            .option_chain
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
        else {
            return Err(ToolError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "empty option chain result".to_string(),
            });
        };

        let block = entry.options.into_iter().next().unwrap_or_default();
        Ok(OptionsChain {
            expiration_dates: entry.expiration_dates,
            expiration: block.expiration_date,
            calls: block.calls,
            puts: block.puts,
        })
    }

    async fn news(&self, query: &str) -> Result<Vec<NewsItem>> {
        self.limiter.until_ready().await;

        let result = self
            .connector
            .search_ticker(query)
            .await
            .map_err(|e| ToolError::YahooFinanceError(e.to_string()))?;

        Ok(result
            .news
            .iter()
            .map(|item| NewsItem {
                title: item.title.clone(),
                publisher: item.publisher.clone(),
                link: item.link.clone(),
                published_at: DateTime::from_timestamp(item.provider_publish_time as i64, 0),
                kind: item.newstype.clone(),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(default)]
    result: Option<Vec<QuoteSummary>>,
}

#[derive(Debug, Deserialize)]
struct OptionsEnvelope {
    #[serde(rename = "optionChain")]
    option_chain: OptionChainResult,
}

#[derive(Debug, Deserialize)]
struct OptionChainResult {
    #[serde(default)]
    result: Option<Vec<OptionChainEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OptionChainEntry {
    expiration_dates: Vec<i64>,
    options: Vec<OptionBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OptionBlock {
    expiration_date: Option<i64>,
    calls: Vec<OptionContract>,
    puts: Vec<OptionContract>,
}
