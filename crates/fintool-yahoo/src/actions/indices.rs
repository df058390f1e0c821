//! Current market data for major indices

use super::thousands;
use crate::error::Result;
use crate::source::MarketDataSource;
use fintool_api::ToolResponse;
use serde_json::{Value, json};
use std::fmt::Write as _;

/// Friendly names for common index symbols
const INDEX_NAMES: &[(&str, &str)] = &[
    ("^GSPC", "S&P 500"),
    ("^DJI", "Dow Jones Industrial Average"),
    ("^IXIC", "NASDAQ Composite"),
    ("^RUT", "Russell 2000"),
    ("^VIX", "CBOE Volatility Index"),
    ("^FTSE", "FTSE 100"),
    ("^N225", "Nikkei 225"),
    ("^HSI", "Hang Seng Index"),
];

fn index_name(symbol: &str) -> Option<&'static str> {
    INDEX_NAMES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, name)| *name)
}

pub(crate) async fn run(source: &dyn MarketDataSource, indices: &[String]) -> Result<ToolResponse> {
    tracing::debug!(?indices, "getting market indices");

    let mut rows: Vec<Value> = Vec::with_capacity(indices.len());
    for symbol in indices {
        let quote = source.latest_quote(symbol).await?;
        let bar = &quote.bar;
        let name = index_name(symbol).map_or_else(|| symbol.clone(), str::to_string);

        let change = quote.previous_close.map(|prev| bar.close - prev);
        let change_percent = quote
            .previous_close
            .filter(|prev| *prev != 0.0)
            .map(|prev| (bar.close - prev) / prev * 100.0);

        rows.push(json!({
            "symbol": symbol,
            "name": name,
            "price": bar.close,
            "change": change,
            "changePercent": change_percent,
            "previousClose": quote.previous_close,
            "open": bar.open,
            "dayHigh": bar.high,
            "dayLow": bar.low,
            "timestamp": bar.timestamp.to_rfc3339(),
        }));
        tracing::debug!(symbol, %name, "retrieved index data");
    }

    let formatted_output = format_indices(&rows);
    let count = rows.len();

    Ok(ToolResponse::new(
        json!({
            "indices": rows,
            "formatted_output": formatted_output,
        }),
        format!("Retrieved current market data for {count} indices"),
    ))
}

fn format_indices(rows: &[Value]) -> String {
    let mut out = String::new();
    for row in rows {
        let fmt_num = |key: &str| {
            row[key]
                .as_f64()
                .map_or_else(|| "N/A".to_string(), |v| thousands(v, 2))
        };
        let change = row["change"].as_f64();
        let sign = if change.is_some_and(|c| c > 0.0) { "+" } else { "" };
        let change_str = change.map_or_else(|| "N/A".to_string(), |v| thousands(v, 2));
        let pct_str = row["changePercent"]
            .as_f64()
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"));

        let _ = writeln!(out, "{}", row["name"].as_str().unwrap_or("Unknown"));
        let _ = writeln!(out, "Price: {}", fmt_num("price"));
        let _ = writeln!(out, "Change: {sign}{change_str} ({sign}{pct_str})");
        let _ = writeln!(out, "Previous Close: {}", fmt_num("previousClose"));
        let _ = writeln!(out, "Day Range: {} - {}", fmt_num("dayLow"), fmt_num("dayHigh"));
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LatestQuote, MockMarketDataSource, QuoteBar};
    use chrono::Utc;

    fn quote_for(symbol: &str, close: f64) -> LatestQuote {
        LatestQuote {
            bar: QuoteBar {
                symbol: symbol.to_string(),
                timestamp: Utc::now(),
                open: close - 10.0,
                high: close + 20.0,
                low: close - 20.0,
                close,
                volume: 0,
                adjclose: close,
            },
            previous_close: Some(close - 25.0),
        }
    }

    #[test]
    fn known_symbols_resolve_to_names() {
        assert_eq!(index_name("^GSPC"), Some("S&P 500"));
        assert_eq!(index_name("^VIX"), Some("CBOE Volatility Index"));
        assert_eq!(index_name("^UNKNOWN"), None);
    }

    #[tokio::test]
    async fn one_row_per_requested_index() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_latest_quote()
            .times(3)
            .returning(|symbol| Ok(quote_for(symbol, 5000.0)));

        let indices = vec![
            "^GSPC".to_string(),
            "^DJI".to_string(),
            "^IXIC".to_string(),
        ];
        let response = run(&source, &indices).await.unwrap();
        let output = response.output;

        let rows = output["indices"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["name"], "S&P 500");
        assert_eq!(rows[0]["change"], 25.0);
        assert_eq!(
            response.sources[0].tool_call_description,
            "Retrieved current market data for 3 indices"
        );
    }

    #[tokio::test]
    async fn formatted_block_lists_each_index() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_latest_quote()
            .returning(|symbol| Ok(quote_for(symbol, 5000.0)));

        let response = run(&source, &["^GSPC".to_string()]).await.unwrap();
        let text = response.output["formatted_output"].as_str().unwrap();

        assert!(text.starts_with("S&P 500"));
        assert!(text.contains("Price: 5,000.00"));
        assert!(text.contains("Change: +25.00 (+0.50%)"));
        assert!(text.contains("Day Range: 4,980.00 - 5,020.00"));
    }
}
