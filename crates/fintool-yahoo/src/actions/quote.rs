//! Current quote for a single symbol

use crate::error::Result;
use crate::source::MarketDataSource;
use fintool_api::ToolResponse;
use serde_json::json;

pub(crate) async fn run(source: &dyn MarketDataSource, symbol: &str) -> Result<ToolResponse> {
    tracing::debug!(symbol, "getting quote");
    let quote = source.latest_quote(symbol).await?;
    let bar = &quote.bar;

    let change = quote.previous_close.map(|prev| bar.close - prev);
    let change_percent = quote
        .previous_close
        .filter(|prev| *prev != 0.0)
        .map(|prev| (bar.close - prev) / prev * 100.0);

    let output = json!({
        "symbol": bar.symbol,
        "price": bar.close,
        "open": bar.open,
        "dayHigh": bar.high,
        "dayLow": bar.low,
        "volume": bar.volume,
        "previousClose": quote.previous_close,
        "change": change,
        "changePercent": change_percent,
        "timestamp": bar.timestamp.to_rfc3339(),
    });

    Ok(ToolResponse::new(
        output,
        format!("Retrieved current quote for {symbol}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LatestQuote, MockMarketDataSource, QuoteBar};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_bar(symbol: &str, close: f64) -> QuoteBar {
        QuoteBar {
            symbol: symbol.to_string(),
            timestamp: Utc::now(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000_000,
            adjclose: close,
        }
    }

    #[tokio::test]
    async fn quote_output_includes_change() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_latest_quote()
            .with(eq("AAPL"))
            .times(1)
            .returning(|symbol| {
                Ok(LatestQuote {
                    bar: sample_bar(symbol, 150.0),
                    previous_close: Some(148.0),
                })
            });

        let response = run(&source, "AAPL").await.unwrap();
        let output = response.output;

        assert_eq!(output["symbol"], "AAPL");
        assert_eq!(output["price"], 150.0);
        assert_eq!(output["change"], 2.0);
        assert!((output["changePercent"].as_f64().unwrap() - 1.3513513513513513).abs() < 1e-9);
        assert_eq!(
            response.sources[0].tool_call_description,
            "Retrieved current quote for AAPL"
        );
    }

    #[tokio::test]
    async fn quote_without_previous_close_omits_change() {
        let mut source = MockMarketDataSource::new();
        source.expect_latest_quote().returning(|symbol| {
            Ok(LatestQuote {
                bar: sample_bar(symbol, 42.0),
                previous_close: None,
            })
        });

        let response = run(&source, "NEWCO").await.unwrap();
        assert!(response.output["change"].is_null());
        assert!(response.output["changePercent"].is_null());
    }
}
