//! Review analytics pipeline
//!
//! Pasted review text is segmented into individual reviews, each review long
//! enough to carry meaning is classified by the language model, and the labels
//! are aggregated into a distribution with rule-based insights. A separate
//! model call extracts free-text insights from the whole input.

pub mod aggregate;
mod analyzer;
mod classify;
mod insights;
mod recommendation;
pub mod segment;
mod types;

pub use aggregate::{Aggregate, aggregate};
pub use analyzer::{MIN_REVIEW_CHARS, NO_VALID_REVIEWS, ReviewAnalyzer};
pub use classify::SentimentClassifier;
pub use insights::{INSIGHTS_UNAVAILABLE, InsightExtractor, MAX_INSIGHTS, parse_insights};
pub use recommendation::Recommendation;
pub use segment::{SegmentStrategy, segment, segment_with_strategy};
pub use types::{
    AnalysisResult, Classified, ReviewReport, SentimentDistribution, SentimentLabel, SentimentPercentages,
};
