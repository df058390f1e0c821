//! Headline sentiment scoring
//!
//! A small finance-flavored lexicon, good enough to rank a handful of
//! headlines; not a substitute for a real NLP model.

use serde::Serialize;

const POSITIVE: &[&str] = &[
    "beat", "beats", "surge", "surges", "rally", "rallies", "upgrade", "upgraded", "growth",
    "record", "profit", "profits", "gain", "gains", "soar", "soars", "bullish", "jump", "jumps",
    "strong", "outperform", "rebound", "buyback", "dividend", "wins", "climbs",
];

const NEGATIVE: &[&str] = &[
    "miss", "misses", "fall", "falls", "drop", "drops", "plunge", "plunges", "downgrade",
    "downgraded", "loss", "losses", "lawsuit", "recall", "bearish", "weak", "cut", "cuts",
    "slump", "slumps", "fear", "fears", "crash", "decline", "declines", "layoff", "layoffs",
    "probe", "warns", "sinks",
];

/// Sentiment of a single piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    /// Score in [-1, 1]
    pub score: f64,
    /// "positive", "negative" or "neutral"
    pub label: &'static str,
}

/// Aggregate sentiment over a batch of articles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentIndex {
    /// Mean article score in [-1, 1]
    pub index: f64,
    pub label: &'static str,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

fn label_for(score: f64) -> &'static str {
    if score > 0.0 {
        "positive"
    } else if score < 0.0 {
        "negative"
    } else {
        "neutral"
    }
}

/// Score one headline or summary
pub fn score_text(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let mut positive = 0usize;
    let mut negative = 0usize;

    for word in lower.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        if POSITIVE.contains(&word) {
            positive += 1;
        } else if NEGATIVE.contains(&word) {
            negative += 1;
        }
    }

    let hits = positive + negative;
    let score = if hits == 0 {
        0.0
    } else {
        (positive as f64 - negative as f64) / hits as f64
    };

    Sentiment {
        score,
        label: label_for(score),
    }
}

/// Aggregate per-article sentiments into one index
pub fn aggregate(scores: &[Sentiment]) -> SentimentIndex {
    let positive = scores.iter().filter(|s| s.label == "positive").count();
    let negative = scores.iter().filter(|s| s.label == "negative").count();
    let neutral = scores.len() - positive - negative;

    let index = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64
    };

    SentimentIndex {
        index,
        label: label_for(index),
        positive,
        negative,
        neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_headline() {
        let s = score_text("Apple shares surge after record profit beats estimates");
        assert_eq!(s.label, "positive");
        assert!(s.score > 0.0);
    }

    #[test]
    fn negative_headline() {
        let s = score_text("Chipmaker plunges as weak outlook fears spark selloff");
        assert_eq!(s.label, "negative");
        assert!(s.score < 0.0);
    }

    #[test]
    fn neutral_when_no_lexicon_hits() {
        let s = score_text("Company schedules annual shareholder meeting");
        assert_eq!(s, Sentiment { score: 0.0, label: "neutral" });
    }

    #[test]
    fn mixed_headline_balances_out() {
        let s = score_text("Stock gains fade as profit warns of cuts");
        assert!(s.score.abs() < 1.0);
    }

    #[test]
    fn aggregate_index() {
        let scores = vec![
            score_text("Shares surge on strong growth"),
            score_text("Rival slumps after downgrade"),
            score_text("Quarterly report published"),
        ];
        let index = aggregate(&scores);
        assert_eq!(index.positive, 1);
        assert_eq!(index.negative, 1);
        assert_eq!(index.neutral, 1);
        assert_eq!(index.label, label_for(index.index));
    }

    #[test]
    fn empty_batch_is_neutral() {
        let index = aggregate(&[]);
        assert_eq!(index.label, "neutral");
        assert_eq!(index.index, 0.0);
    }
}
