//! Sentiment aggregation and rule-based summary insights

use super::types::{SentimentDistribution, SentimentLabel, SentimentPercentages, percent};

pub const OVERWHELMINGLY_POSITIVE: &str = "Overwhelmingly positive reviews - visitors love this destination!";
pub const GENERALLY_POSITIVE: &str = "Generally positive sentiment with most visitors having good experiences";
pub const CONCERNING_NEGATIVE: &str =
    "Concerning number of negative reviews - consider investigating common issues";
pub const MIXED_REVIEWS: &str = "Mixed reviews with varied visitor experiences";
pub const STRONG_POSITIVE: &str = "Strong positive sentiment indicates high visitor satisfaction";

/// Counts, percentages and rule insights for a batch of labels
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub distribution: SentimentDistribution,
    pub percentages: SentimentPercentages,
    pub rule_insights: Vec<String>,
}

/// Aggregate classified labels
///
/// An empty slice yields a zeroed distribution and no insights.
pub fn aggregate(labels: &[SentimentLabel]) -> Aggregate {
    let distribution = SentimentDistribution::from_labels(labels);
    let percentages = SentimentPercentages::from_distribution(&distribution);

    Aggregate {
        distribution,
        percentages,
        rule_insights: rule_insights(&distribution),
    }
}

/// Exactly one headline rule fires (first match wins); the strong-positive
/// rule is independent of it. Thresholds use unrounded percentages.
fn rule_insights(dist: &SentimentDistribution) -> Vec<String> {
    let total = dist.total();
    if total == 0 {
        return Vec::new();
    }

    let positive_pct = percent(dist.positive, total);
    let negative_pct = percent(dist.negative, total);

    let headline = if positive_pct > 70.0 {
        OVERWHELMINGLY_POSITIVE
    } else if positive_pct > 50.0 {
        GENERALLY_POSITIVE
    } else if negative_pct > 50.0 {
        CONCERNING_NEGATIVE
    } else {
        MIXED_REVIEWS
    };

    let mut insights = vec![headline.to_string()];
    if dist.positive > dist.negative * 2 {
        insights.push(STRONG_POSITIVE.to_string());
    }
    insights
}
