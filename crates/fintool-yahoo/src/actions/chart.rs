//! Chart data preparation

use crate::error::Result;
use crate::source::MarketDataSource;
use fintool_api::ToolResponse;
use serde_json::{Map, Value, json};
use ta::Next;
use ta::indicators::SimpleMovingAverage;

pub(crate) async fn run(
    source: &dyn MarketDataSource,
    symbol: &str,
    range: &str,
    indicators: &[String],
) -> Result<ToolResponse> {
    tracing::debug!(symbol, range, ?indicators, "preparing chart data");

    let bars = source.range_quotes(symbol, "1d", range).await?;
    if bars.is_empty() {
        return Ok(ToolResponse::new(
            json!({
                "symbol": symbol,
                "range": range,
                "message": "No chart data available for this range",
            }),
            format!("No chart data available for {symbol} over {range}"),
        ));
    }

    let candlestick: Vec<Value> = bars
        .iter()
        .map(|bar| {
            json!({
                "timestamp": bar.timestamp.to_rfc3339(),
                "open": bar.open,
                "high": bar.high,
                "low": bar.low,
                "close": bar.close,
                "volume": bar.volume,
            })
        })
        .collect();

    let line: Vec<Value> = bars
        .iter()
        .map(|bar| {
            json!({
                "timestamp": bar.timestamp.to_rfc3339(),
                "value": bar.close,
            })
        })
        .collect();

    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let mut indicator_data = Map::new();

    for indicator in indicators {
        let Some(series) = sma_series(indicator, &closes) else {
            tracing::warn!(indicator, "skipping unsupported indicator");
            continue;
        };
        let points: Vec<Value> = bars
            .iter()
            .zip(series)
            .map(|(bar, value)| {
                json!({
                    "timestamp": bar.timestamp.to_rfc3339(),
                    "value": value,
                })
            })
            .collect();
        indicator_data.insert(indicator.clone(), Value::Array(points));
    }

    let output = json!({
        "symbol": symbol,
        "range": range,
        "data_points": bars.len(),
        "candlestick": candlestick,
        "line": line,
        "indicators": indicator_data,
    });

    Ok(ToolResponse::new(
        output,
        format!("Prepared chart data for {symbol} over {range}"),
    ))
}

/// Compute an `SMA_<period>` series over closing prices
///
/// Returns None for names that are not simple moving averages or whose
/// period does not fit the data.
fn sma_series(indicator: &str, closes: &[f64]) -> Option<Vec<f64>> {
    let period: usize = indicator.strip_prefix("SMA_")?.parse().ok()?;
    if period == 0 || period > closes.len() {
        return None;
    }

    let mut sma = SimpleMovingAverage::new(period).ok()?;
    Some(closes.iter().map(|&close| sma.next(close)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockMarketDataSource, QuoteBar};
    use chrono::{TimeZone, Utc};

    fn bars(closes: &[f64]) -> Vec<QuoteBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| QuoteBar {
                symbol: "AAPL".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
                adjclose: close,
            })
            .collect()
    }

    #[test]
    fn sma_series_averages_closes() {
        let closes = [10.0, 20.0, 30.0, 40.0];
        let series = sma_series("SMA_2", &closes).unwrap();
        assert_eq!(series, vec![10.0, 15.0, 25.0, 35.0]);
    }

    #[test]
    fn sma_series_rejects_bad_names_and_periods() {
        assert!(sma_series("EMA_5", &[1.0, 2.0]).is_none());
        assert!(sma_series("SMA_0", &[1.0, 2.0]).is_none());
        assert!(sma_series("SMA_3", &[1.0, 2.0]).is_none());
        assert!(sma_series("SMA_x", &[1.0, 2.0]).is_none());
    }

    #[tokio::test]
    async fn chart_output_has_candlestick_line_and_indicators() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_range_quotes()
            .times(1)
            .returning(|_, _, _| Ok(bars(&[10.0, 20.0, 30.0])));

        let indicators = vec!["SMA_2".to_string(), "RSI_14".to_string()];
        let response = run(&source, "AAPL", "3mo", &indicators).await.unwrap();
        let output = response.output;

        assert_eq!(output["data_points"], 3);
        assert_eq!(output["candlestick"].as_array().unwrap().len(), 3);
        assert_eq!(output["line"][2]["value"], 30.0);
        assert_eq!(output["indicators"]["SMA_2"][2]["value"], 25.0);
        assert!(output["indicators"].get("RSI_14").is_none());
    }

    #[tokio::test]
    async fn empty_range_reports_message() {
        let mut source = MockMarketDataSource::new();
        source.expect_range_quotes().returning(|_, _, _| Ok(vec![]));

        let response = run(&source, "AAPL", "1d", &[]).await.unwrap();
        assert_eq!(
            response.output["message"],
            "No chart data available for this range"
        );
    }
}
