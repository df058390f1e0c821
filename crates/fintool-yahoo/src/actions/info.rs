//! Company profile information

use crate::error::Result;
use crate::source::MarketDataSource;
use fintool_api::ToolResponse;
use serde_json::json;

const MODULES: &str = "assetProfile,price,summaryDetail";

pub(crate) async fn run(source: &dyn MarketDataSource, symbol: &str) -> Result<ToolResponse> {
    tracing::debug!(symbol, "getting company info");

    let summary = source.quote_summary(symbol, MODULES).await?;
    let profile = summary.asset_profile.unwrap_or_default();
    let price = summary.price.unwrap_or_default();
    let detail = summary.summary_detail.unwrap_or_default();

    let market_cap = price
        .market_cap
        .as_ref()
        .and_then(|m| m.raw)
        .or_else(|| detail.market_cap.as_ref().and_then(|m| m.raw));

    let output = json!({
        "symbol": symbol,
        "name": price.short_name.or(price.long_name),
        "industry": profile.industry,
        "sector": profile.sector,
        "country": profile.country,
        "website": profile.website,
        "currency": price.currency,
        "exchange": price.exchange_name,
        "marketCap": market_cap,
        "employees": profile.full_time_employees,
        "description": profile.long_business_summary,
    });

    Ok(ToolResponse::new(
        output,
        format!("Retrieved company information for {symbol}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{AssetProfile, MockMarketDataSource, PriceInfo, QuoteSummary, RawNum};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn info_flattens_summary_modules() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_quote_summary()
            .with(eq("AAPL"), eq(MODULES))
            .times(1)
            .returning(|_, _| {
                Ok(QuoteSummary {
                    asset_profile: Some(AssetProfile {
                        industry: Some("Consumer Electronics".to_string()),
                        sector: Some("Technology".to_string()),
                        country: Some("United States".to_string()),
                        full_time_employees: Some(164_000),
                        ..AssetProfile::default()
                    }),
                    price: Some(PriceInfo {
                        short_name: Some("Apple Inc.".to_string()),
                        currency: Some("USD".to_string()),
                        market_cap: Some(RawNum {
                            raw: Some(3.1e12),
                            fmt: Some("3.1T".to_string()),
                        }),
                        ..PriceInfo::default()
                    }),
                    ..QuoteSummary::default()
                })
            });

        let response = run(&source, "AAPL").await.unwrap();
        let output = response.output;

        assert_eq!(output["name"], "Apple Inc.");
        assert_eq!(output["sector"], "Technology");
        assert_eq!(output["marketCap"], 3.1e12);
        assert_eq!(output["employees"], 164_000);
    }

    #[tokio::test]
    async fn info_tolerates_sparse_summaries() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_quote_summary()
            .returning(|_, _| Ok(QuoteSummary::default()));

        let response = run(&source, "TINY").await.unwrap();
        assert_eq!(response.output["symbol"], "TINY");
        assert!(response.output["name"].is_null());
        assert!(response.output["marketCap"].is_null());
    }
}
