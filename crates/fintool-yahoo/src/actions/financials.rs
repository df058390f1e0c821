//! Financial statements

use super::thousands;
use crate::error::Result;
use crate::request::{FinancialPeriod, StatementKind};
use crate::source::{MarketDataSource, QuoteSummary, StatementHistory};
use fintool_api::ToolResponse;
use serde_json::{Map, Value, json};
use std::fmt::Write as _;

fn requested_kinds(statement: StatementKind) -> Vec<StatementKind> {
    match statement {
        StatementKind::All => vec![
            StatementKind::Income,
            StatementKind::Balance,
            StatementKind::Cash,
        ],
        single => vec![single],
    }
}

fn module_for(kind: StatementKind, period: FinancialPeriod) -> &'static str {
    match (kind, period) {
        (StatementKind::Income, FinancialPeriod::Annual) => "incomeStatementHistory",
        (StatementKind::Income, FinancialPeriod::Quarterly) => "incomeStatementHistoryQuarterly",
        (StatementKind::Balance, FinancialPeriod::Annual) => "balanceSheetHistory",
        (StatementKind::Balance, FinancialPeriod::Quarterly) => "balanceSheetHistoryQuarterly",
        (StatementKind::Cash, FinancialPeriod::Annual) => "cashflowStatementHistory",
        (StatementKind::Cash, FinancialPeriod::Quarterly) => "cashflowStatementHistoryQuarterly",
        (StatementKind::All, _) => unreachable!("All is expanded before module lookup"),
    }
}

fn select<'a>(
    summary: &'a QuoteSummary,
    kind: StatementKind,
    period: FinancialPeriod,
) -> Option<&'a StatementHistory> {
    match (kind, period) {
        (StatementKind::Income, FinancialPeriod::Annual) => summary.income_statement_history.as_ref(),
        (StatementKind::Income, FinancialPeriod::Quarterly) => {
            summary.income_statement_history_quarterly.as_ref()
        }
        (StatementKind::Balance, FinancialPeriod::Annual) => summary.balance_sheet_history.as_ref(),
        (StatementKind::Balance, FinancialPeriod::Quarterly) => {
            summary.balance_sheet_history_quarterly.as_ref()
        }
        (StatementKind::Cash, FinancialPeriod::Annual) => summary.cashflow_statement_history.as_ref(),
        (StatementKind::Cash, FinancialPeriod::Quarterly) => {
            summary.cashflow_statement_history_quarterly.as_ref()
        }
        (StatementKind::All, _) => None,
    }
}

fn output_key(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::Income => "income_statement",
        StatementKind::Balance => "balance_sheet",
        StatementKind::Cash => "cash_flow",
        StatementKind::All => "all",
    }
}

fn statement_label(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::Income => "Income Statement",
        StatementKind::Balance => "Balance Sheet",
        StatementKind::Cash => "Cash Flow Statement",
        StatementKind::All => "All Statements",
    }
}

fn statement_name(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::Income => "income",
        StatementKind::Balance => "balance",
        StatementKind::Cash => "cash",
        StatementKind::All => "all",
    }
}

fn period_label(period: FinancialPeriod) -> &'static str {
    match period {
        FinancialPeriod::Annual => "Annual",
        FinancialPeriod::Quarterly => "Quarterly",
    }
}

fn period_name(period: FinancialPeriod) -> &'static str {
    match period {
        FinancialPeriod::Annual => "annual",
        FinancialPeriod::Quarterly => "quarterly",
    }
}

/// Pivot statement rows into item -> {date -> value} maps
///
/// Rows arrive as raw line-item maps keyed by date; only numeric `{raw}`
/// entries survive, which drops bookkeeping fields like `maxAge`.
fn transpose(history: &StatementHistory) -> Map<String, Value> {
    let mut items = Map::new();
    for row in &history.statements {
        let Some(date) = row
            .get("endDate")
            .and_then(|d| d.get("fmt"))
            .and_then(Value::as_str)
        else {
            continue;
        };
        for (key, value) in row {
            if key == "endDate" || key == "maxAge" {
                continue;
            }
            let Some(raw) = value.get("raw").and_then(Value::as_f64) else {
                continue;
            };
            let entry = items
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(dates) = entry {
                dates.insert(date.to_string(), json!(raw));
            }
        }
    }
    items
}

fn format_value(value: f64) -> String {
    if value.abs() >= 1.0 {
        thousands(value, 0)
    } else {
        format!("{value:.2}")
    }
}

pub(crate) async fn run(
    source: &dyn MarketDataSource,
    symbol: &str,
    statement: StatementKind,
    period: FinancialPeriod,
) -> Result<ToolResponse> {
    tracing::debug!(
        symbol,
        statement = statement_name(statement),
        period = period_name(period),
        "getting company financials"
    );

    let kinds = requested_kinds(statement);
    let modules: Vec<&str> = std::iter::once("price")
        .chain(kinds.iter().map(|&k| module_for(k, period)))
        .collect();
    let summary = source.quote_summary(symbol, &modules.join(",")).await?;

    let price = summary.price.clone().unwrap_or_default();
    let currency = price.currency.unwrap_or_else(|| "USD".to_string());
    let name = price.short_name.unwrap_or_else(|| symbol.to_string());

    let mut financials = Map::new();
    let mut formatted = format!("Financial Statements for {name} ({symbol})\nCurrency: {currency}\n\n");

    for &kind in &kinds {
        let Some(history) = select(&summary, kind, period) else {
            continue;
        };
        let data = transpose(history);
        if data.is_empty() {
            continue;
        }

        let _ = writeln!(formatted, "=== {} {} ===", period_label(period), statement_label(kind));
        for (item, dates) in &data {
            let _ = writeln!(formatted, "{item}:");
            if let Value::Object(dates) = dates {
                for (date, value) in dates {
                    if let Some(v) = value.as_f64() {
                        let _ = writeln!(formatted, "  {date}: {}", format_value(v));
                    }
                }
            }
            formatted.push('\n');
        }

        financials.insert(output_key(kind).to_string(), Value::Object(data));
    }

    if financials.is_empty() {
        return Ok(ToolResponse::new(
            json!({
                "symbol": symbol,
                "name": name,
                "message": "No financial statement data available",
            }),
            format!("No financial statement data available for {symbol}"),
        ));
    }

    let output = json!({
        "symbol": symbol,
        "name": name,
        "currency": currency,
        "statement_type": statement_name(statement),
        "period": period_name(period),
        "financials": financials,
        "formatted_output": formatted,
    });

    Ok(ToolResponse::new(
        output,
        format!(
            "Retrieved {} financial statements for {symbol} ({})",
            statement_name(statement),
            period_name(period)
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockMarketDataSource;
    use mockall::predicate::eq;

    fn income_history() -> StatementHistory {
        let rows = json!([
            {
                "maxAge": 1,
                "endDate": {"raw": 1_696_032_000, "fmt": "2023-09-30"},
                "totalRevenue": {"raw": 383_285_000_000.0, "fmt": "383.29B"},
                "netIncome": {"raw": 96_995_000_000.0, "fmt": "97.0B"}
            },
            {
                "endDate": {"raw": 1_664_496_000, "fmt": "2022-09-24"},
                "totalRevenue": {"raw": 394_328_000_000.0, "fmt": "394.33B"},
                "netIncome": {"raw": 99_803_000_000.0, "fmt": "99.8B"}
            }
        ]);
        serde_json::from_value(json!({"incomeStatementHistory": rows})).unwrap()
    }

    #[test]
    fn transpose_pivots_items_over_dates() {
        let items = transpose(&income_history());

        let revenue = items["totalRevenue"].as_object().unwrap();
        assert_eq!(revenue["2023-09-30"], 383_285_000_000.0);
        assert_eq!(revenue["2022-09-24"], 394_328_000_000.0);
        assert!(!items.contains_key("maxAge"));
        assert!(!items.contains_key("endDate"));
    }

    #[test]
    fn small_values_keep_decimals() {
        assert_eq!(format_value(0.42), "0.42");
        assert_eq!(format_value(96_995_000_000.0), "96,995,000,000");
    }

    #[tokio::test]
    async fn income_statement_request_builds_expected_modules() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_quote_summary()
            .with(eq("AAPL"), eq("price,incomeStatementHistory"))
            .times(1)
            .returning(|_, _| {
                Ok(QuoteSummary {
                    income_statement_history: Some(income_history()),
                    ..QuoteSummary::default()
                })
            });

        let response = run(
            &source,
            "AAPL",
            StatementKind::Income,
            FinancialPeriod::Annual,
        )
        .await
        .unwrap();
        let output = response.output;

        assert_eq!(output["statement_type"], "income");
        assert_eq!(output["period"], "annual");
        assert!(output["financials"]["income_statement"]["totalRevenue"].is_object());

        let text = output["formatted_output"].as_str().unwrap();
        assert!(text.contains("=== Annual Income Statement ==="));
        assert!(text.contains("  2023-09-30: 383,285,000,000"));
    }

    #[tokio::test]
    async fn all_statements_expand_to_three_modules() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_quote_summary()
            .with(
                eq("AAPL"),
                eq("price,incomeStatementHistoryQuarterly,balanceSheetHistoryQuarterly,cashflowStatementHistoryQuarterly"),
            )
            .times(1)
            .returning(|_, _| Ok(QuoteSummary::default()));

        let response = run(
            &source,
            "AAPL",
            StatementKind::All,
            FinancialPeriod::Quarterly,
        )
        .await
        .unwrap();

        assert_eq!(
            response.output["message"],
            "No financial statement data available"
        );
    }
}
