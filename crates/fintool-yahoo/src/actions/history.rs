//! Historical price data with analysis and a formatted table

use super::thousands;
use crate::error::Result;
use crate::source::{MarketDataSource, QuoteBar};
use fintool_api::ToolResponse;
use serde_json::{Value, json};
use std::fmt::Write as _;

/// Rows shown in the formatted table
const MAX_DISPLAY_ROWS: usize = 7;

pub(crate) async fn run(
    source: &dyn MarketDataSource,
    symbol: &str,
    period: &str,
    interval: &str,
) -> Result<ToolResponse> {
    tracing::debug!(symbol, period, interval, "getting history");

    let summary = source.quote_summary(symbol, "price").await?;
    let price = summary.price.unwrap_or_default();
    let currency = price.currency.unwrap_or_else(|| "USD".to_string());
    let name = price.short_name.unwrap_or_else(|| symbol.to_string());

    let bars = source.range_quotes(symbol, interval, period).await?;
    if bars.is_empty() {
        return Ok(ToolResponse::new(
            json!({
                "symbol": symbol,
                "name": name,
                "message": "No historical data available for this period and interval",
            }),
            format!(
                "No historical data available for {symbol} with period {period} and interval {interval}"
            ),
        ));
    }

    let rows: Vec<Value> = bars
        .iter()
        .map(|bar| {
            json!({
                "date": bar.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                "open": bar.open,
                "high": bar.high,
                "low": bar.low,
                "close": bar.close,
                "volume": bar.volume,
            })
        })
        .collect();

    let first_close = bars.first().map(|b| b.close);
    let last_close = bars.last().map(|b| b.close);
    let price_change = match (first_close, last_close) {
        (Some(first), Some(last)) => Some(last - first),
        _ => None,
    };
    let price_change_percent = match (first_close, price_change) {
        (Some(first), Some(change)) if first > 0.0 => Some(change / first * 100.0),
        _ => None,
    };

    let time_range = format!(
        "{} to {}",
        bars[0].timestamp.format("%m/%d/%Y"),
        bars[bars.len() - 1].timestamp.format("%m/%d/%Y"),
    );

    let formatted_output = format_history(
        &name,
        symbol,
        period,
        interval,
        &currency,
        &time_range,
        &bars,
        price_change,
        price_change_percent,
    );

    let output = json!({
        "symbol": symbol,
        "period": period,
        "interval": interval,
        "data": rows,
        "name": name,
        "currency": currency,
        "time_range": time_range,
        "price_change": price_change,
        "price_change_percent": price_change_percent,
        "formatted_output": formatted_output,
    });

    Ok(ToolResponse::new(
        output,
        format!("Retrieved historical data for {symbol} with period {period} and interval {interval}"),
    ))
}

/// Indices of the rows sampled into the formatted table
///
/// Short histories show every row; longer ones sample evenly so the table
/// stays readable.
fn sample_indices(len: usize) -> Vec<usize> {
    if len <= MAX_DISPLAY_ROWS {
        return (0..len).collect();
    }
    let step = len / MAX_DISPLAY_ROWS;
    (0..len)
        .step_by(step.max(1))
        .take(MAX_DISPLAY_ROWS)
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn format_history(
    name: &str,
    symbol: &str,
    period: &str,
    interval: &str,
    currency: &str,
    time_range: &str,
    bars: &[QuoteBar],
    price_change: Option<f64>,
    price_change_percent: Option<f64>,
) -> String {
    let mut out = format!("Historical data for {name} ({symbol}) ({period}, {interval} intervals)\n");
    let _ = writeln!(out, "Currency: {currency}");
    let _ = writeln!(out, "Trading Period: {time_range}");
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<11} | {:<9} | {:<9} | {:<9} | {:<9} | {:<12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    let _ = writeln!(
        out,
        "{}|{}|{}|{}|{}|{}",
        "-".repeat(11),
        "-".repeat(11),
        "-".repeat(11),
        "-".repeat(11),
        "-".repeat(11),
        "-".repeat(14)
    );

    for i in sample_indices(bars.len()) {
        let bar = &bars[i];
        let volume = if bar.volume > 0 {
            thousands(bar.volume as f64, 0)
        } else {
            "N/A".to_string()
        };
        let _ = writeln!(
            out,
            "{:<10} | {:<9} | {:<9} | {:<9} | {:<9} | {:<12}",
            bar.timestamp.format("%Y-%m-%d").to_string(),
            format!("${:.2}", bar.open),
            format!("${:.2}", bar.high),
            format!("${:.2}", bar.low),
            format!("${:.2}", bar.close),
            volume,
        );
    }

    if let (Some(change), Some(pct)) = (price_change, price_change_percent) {
        let sign = if change > 0.0 { "+" } else { "" };
        let _ = write!(
            out,
            "\nPrice Change: {sign}${change:.2} ({sign}{pct:.2}%)"
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockMarketDataSource, PriceInfo, QuoteSummary};
    use chrono::{TimeZone, Utc};

    fn bars(closes: &[f64]) -> Vec<QuoteBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| QuoteBar {
                symbol: "AAPL".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 2 + i as u32, 0, 0, 0).unwrap(),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 50_000_000,
                adjclose: close,
            })
            .collect()
    }

    #[test]
    fn sampling_keeps_short_histories_whole() {
        assert_eq!(sample_indices(3), vec![0, 1, 2]);
        assert_eq!(sample_indices(7), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sampling_spreads_long_histories() {
        let indices = sample_indices(30);
        assert_eq!(indices.len(), MAX_DISPLAY_ROWS);
        assert_eq!(indices[0], 0);
        assert!(indices.windows(2).all(|w| w[1] - w[0] == 4));
    }

    #[test]
    fn formatted_table_contains_header_and_change() {
        let bars = bars(&[100.0, 102.0, 104.0]);
        let text = format_history(
            "Apple Inc.",
            "AAPL",
            "1mo",
            "1d",
            "USD",
            "01/02/2024 to 01/04/2024",
            &bars,
            Some(4.0),
            Some(4.0),
        );

        assert!(text.starts_with("Historical data for Apple Inc. (AAPL) (1mo, 1d intervals)"));
        assert!(text.contains("Currency: USD"));
        assert!(text.contains("Date"));
        assert!(text.contains("$104.00"));
        assert!(text.contains("50,000,000"));
        assert!(text.ends_with("Price Change: +$4.00 (+4.00%)"));
    }

    #[tokio::test]
    async fn history_output_carries_analysis_fields() {
        let mut source = MockMarketDataSource::new();
        source.expect_quote_summary().times(1).returning(|_, _| {
            Ok(QuoteSummary {
                price: Some(PriceInfo {
                    short_name: Some("Apple Inc.".to_string()),
                    currency: Some("USD".to_string()),
                    ..PriceInfo::default()
                }),
                ..QuoteSummary::default()
            })
        });
        source
            .expect_range_quotes()
            .times(1)
            .returning(|_, _, _| Ok(bars(&[100.0, 110.0])));

        let response = run(&source, "AAPL", "1mo", "1d").await.unwrap();
        let output = response.output;

        assert_eq!(output["name"], "Apple Inc.");
        assert_eq!(output["data"].as_array().unwrap().len(), 2);
        assert_eq!(output["price_change"], 10.0);
        assert_eq!(output["price_change_percent"], 10.0);
        assert!(output["formatted_output"]
            .as_str()
            .unwrap()
            .contains("Trading Period:"));
    }

    #[tokio::test]
    async fn empty_history_reports_message() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_quote_summary()
            .returning(|_, _| Ok(QuoteSummary::default()));
        source.expect_range_quotes().returning(|_, _, _| Ok(vec![]));

        let response = run(&source, "AAPL", "1d", "1m").await.unwrap();
        assert_eq!(
            response.output["message"],
            "No historical data available for this period and interval"
        );
    }
}
