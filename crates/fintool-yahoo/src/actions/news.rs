//! Latest news with a sentiment index

use crate::error::Result;
use crate::sentiment::{self, Sentiment};
use crate::source::{MarketDataSource, NewsItem};
use fintool_api::ToolResponse;
use serde_json::{Value, json};
use std::fmt::Write as _;

/// Proxy query for general market news
const MARKET_PROXY: &str = "^GSPC";

pub(crate) async fn run(
    source: &dyn MarketDataSource,
    symbol: Option<&str>,
    count: u32,
) -> Result<ToolResponse> {
    tracing::debug!(?symbol, count, "getting stock news");

    let (items, news_source) = match symbol {
        Some(symbol) => {
            let items = source.news(symbol).await?;
            let summary = source.quote_summary(symbol, "price").await?;
            let name = summary
                .price
                .and_then(|p| p.short_name)
                .unwrap_or_else(|| symbol.to_string());
            (items, format!("{name} ({symbol})"))
        }
        None => (
            source.news(MARKET_PROXY).await?,
            "General Market News".to_string(),
        ),
    };

    let items: Vec<NewsItem> = items.into_iter().take(count.min(10) as usize).collect();
    if items.is_empty() {
        let description = format!("No news articles available for {news_source}");
        return Ok(ToolResponse::new(
            json!({
                "source": news_source,
                "message": "No news articles available",
            }),
            description,
        ));
    }

    let scored: Vec<(NewsItem, Sentiment)> = items
        .into_iter()
        .map(|item| {
            let sentiment = sentiment::score_text(&item.title);
            (item, sentiment)
        })
        .collect();
    let index = sentiment::aggregate(&scored.iter().map(|(_, s)| *s).collect::<Vec<_>>());

    let news: Vec<Value> = scored
        .iter()
        .map(|(item, sentiment)| {
            json!({
                "title": item.title,
                "publisher": item.publisher,
                "link": item.link,
                "publish_date": publish_date(item),
                "type": item.kind,
                "sentiment": sentiment,
            })
        })
        .collect();

    let formatted_output = format_news(&news_source, &scored, &index);
    let count = scored.len();
    let description = format!("Retrieved {count} news articles for {news_source}");

    Ok(ToolResponse::new(
        json!({
            "source": news_source,
            "count": count,
            "news": news,
            "sentiment": index,
            "formatted_output": formatted_output,
        }),
        description,
    ))
}

fn publish_date(item: &NewsItem) -> String {
    item.published_at.map_or_else(
        || "Unknown Date".to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

fn format_news(
    news_source: &str,
    scored: &[(NewsItem, Sentiment)],
    index: &sentiment::SentimentIndex,
) -> String {
    let mut out = format!("=== Latest News for {news_source} ===\n\n");

    for (i, (item, sentiment)) in scored.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item.title);
        let _ = writeln!(
            out,
            "   Source: {} | Date: {}",
            item.publisher,
            publish_date(item)
        );
        let _ = writeln!(
            out,
            "   Sentiment: {} ({:+.2})",
            sentiment.label, sentiment.score
        );
        let _ = writeln!(out, "   Link: {}", item.link);
        out.push('\n');
    }

    let _ = write!(
        out,
        "Market sentiment index: {:+.2} ({})",
        index.index, index.label
    );
    out
}
