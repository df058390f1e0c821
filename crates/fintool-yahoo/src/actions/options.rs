//! Options chain data

use crate::error::{Result, ToolError};
use crate::request::OptionSide;
use crate::source::{MarketDataSource, OptionContract};
use chrono::{DateTime, NaiveDate};
use fintool_api::ToolResponse;
use serde_json::{Value, json};

/// Strikes returned per side
const MAX_STRIKES: usize = 10;

pub(crate) async fn run(
    source: &dyn MarketDataSource,
    symbol: &str,
    option_type: Option<OptionSide>,
    expiration_date: Option<&str>,
) -> Result<ToolResponse> {
    tracing::debug!(symbol, ?option_type, ?expiration_date, "getting options");

    let mut chain = source.options_chain(symbol, None).await?;
    if chain.expiration_dates.is_empty() {
        return Ok(ToolResponse::new(
            json!({
                "symbol": symbol,
                "message": "No options data available for this ticker",
            }),
            format!("No options available for {symbol}"),
        ));
    }

    if let Some(requested) = expiration_date {
        let epoch = parse_expiration(requested)?;
        if chain.expiration_dates.contains(&epoch) {
            chain = source.options_chain(symbol, Some(epoch)).await?;
        } else {
            let available: Vec<String> = chain
                .expiration_dates
                .iter()
                .map(|&e| epoch_to_date(e))
                .collect();
            return Ok(ToolResponse::new(
                json!({
                    "symbol": symbol,
                    "availableExpirations": available,
                    "message": format!(
                        "Expiration date {requested} not available. Please choose from available dates."
                    ),
                }),
                format!("Invalid expiration date for {symbol}"),
            ));
        }
    }

    let expiration = chain
        .expiration
        .or_else(|| chain.expiration_dates.first().copied())
        .map(epoch_to_date)
        .unwrap_or_default();

    let description = match option_type {
        Some(OptionSide::Call) => {
            format!("Retrieved Calls options for {symbol} expiring {expiration}")
        }
        Some(OptionSide::Put) => format!("Retrieved Puts options for {symbol} expiring {expiration}"),
        None => format!("Retrieved options chain for {symbol} expiring {expiration}"),
    };

    let output = match option_type {
        Some(side) => {
            let (label, contracts) = match side {
                OptionSide::Call => ("Calls", &chain.calls),
                OptionSide::Put => ("Puts", &chain.puts),
            };
            json!({
                "symbol": symbol,
                "expirationDate": expiration,
                "optionType": label,
                "data": contract_rows(contracts),
            })
        }
        None => json!({
            "symbol": symbol,
            "expirationDate": expiration,
            "calls": contract_rows(&chain.calls),
            "puts": contract_rows(&chain.puts),
        }),
    };

    Ok(ToolResponse::new(output, description))
}

fn parse_expiration(date: &str) -> Result<i64> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ToolError::InvalidParams(format!(
            "expirationDate must be in YYYY-MM-DD format, got '{date}'"
        ))
    })?;
    parsed
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| ToolError::InvalidParams(format!("invalid expiration date '{date}'")))
}

fn epoch_to_date(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| epoch.to_string())
}

fn contract_rows(contracts: &[OptionContract]) -> Vec<Value> {
    contracts
        .iter()
        .take(MAX_STRIKES)
        .map(|c| {
            json!({
                "strike": c.strike,
                "lastPrice": c.last_price,
                "bid": c.bid,
                "ask": c.ask,
                "change": c.change,
                "percentChange": c.percent_change,
                "volume": c.volume,
                "openInterest": c.open_interest,
                "impliedVolatility": c.implied_volatility,
            })
        })
        .collect()
}
