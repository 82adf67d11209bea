//! Review analytics data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment of a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Lowercase form the model is asked to answer with
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Interpret a free-text model answer
    ///
    /// Exact label first, then substring containment of "positive" and then
    /// "negative"; anything else is Neutral.
    pub fn from_model_response(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if let Ok(label) = normalized.parse() {
            return label;
        }
        if normalized.contains("positive") {
            Self::Positive
        } else if normalized.contains("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            other => Err(format!("Unknown sentiment label: {}", other)),
        }
    }
}

/// Value produced by a collaborator call, flagged when it is a stand-in default
#[derive(Debug, Clone, PartialEq)]
pub struct Classified<T> {
    pub value: T,
    /// True when the collaborator failed and `value` is the fallback
    pub fallback: bool,
}

impl<T> Classified<T> {
    pub fn ok(value: T) -> Self {
        Self { value, fallback: false }
    }

    pub fn fallback(value: T) -> Self {
        Self { value, fallback: true }
    }
}

/// Count of classified reviews per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn from_labels(labels: &[SentimentLabel]) -> Self {
        labels.iter().fold(Self::default(), |mut dist, label| {
            match label {
                SentimentLabel::Positive => dist.positive += 1,
                SentimentLabel::Negative => dist.negative += 1,
                SentimentLabel::Neutral => dist.neutral += 1,
            }
            dist
        })
    }

    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Share of classified reviews per label, in percent with one decimal place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentPercentages {
    #[serde(rename = "Positive")]
    pub positive: f64,
    #[serde(rename = "Neutral")]
    pub neutral: f64,
    #[serde(rename = "Negative")]
    pub negative: f64,
}

impl SentimentPercentages {
    /// All zero when the distribution is empty
    pub fn from_distribution(dist: &SentimentDistribution) -> Self {
        let total = dist.total();
        if total == 0 {
            return Self::default();
        }
        let pct = |count: usize| round_one_decimal(percent(count, total));
        Self {
            positive: pct(dist.positive),
            neutral: pct(dist.neutral),
            negative: pct(dist.negative),
        }
    }

    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }
}

/// Unrounded `count / total * 100`; callers guarantee `total > 0`
pub(crate) fn percent(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Successful outcome of a review analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Number of classified reviews (short segments excluded)
    pub total_reviews: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub sentiment_percentages: SentimentPercentages,
    /// Model-derived insights followed by rule-derived insights
    pub insights: Vec<String>,
    /// Collaborator calls that fell back to a default value
    #[serde(default)]
    pub fallback_calls: usize,
}

/// Result of `analyze_reviews`: a report, or an error message alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Report(ReviewReport),
    Error { error: String },
}

impl AnalysisResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { error: message.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            Self::Report(_) => None,
        }
    }

    pub fn report(&self) -> Option<&ReviewReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Error { .. } => None,
        }
    }
}
