//! Review analysis orchestration

use std::sync::Arc;

use eyre::Result;
use tracing::{debug, info};

use super::aggregate::aggregate;
use super::classify::SentimentClassifier;
use super::insights::InsightExtractor;
use super::segment::segment;
use super::types::{AnalysisResult, ReviewReport};
use crate::llm::LlmClient;
use crate::prompts::PromptLoader;

/// Error message returned when segmentation finds nothing to analyze
pub const NO_VALID_REVIEWS: &str = "No valid reviews found";

/// Segments this short (after trimming, in characters) are not classified
pub const MIN_REVIEW_CHARS: usize = 10;

/// Runs the full segment, classify, extract, aggregate pipeline
pub struct ReviewAnalyzer {
    classifier: SentimentClassifier,
    extractor: InsightExtractor,
}

impl ReviewAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self {
            classifier: SentimentClassifier::new(llm.clone(), prompts.clone()),
            extractor: InsightExtractor::new(llm, prompts),
        }
    }

    /// Analyze pasted review text
    ///
    /// Blank input yields the error variant without contacting the model.
    /// Segments are classified one at a time, in order; insights are
    /// extracted from the original text rather than the segments.
    pub async fn analyze_reviews(&self, raw: &str) -> Result<AnalysisResult> {
        debug!(raw_len = raw.len(), "analyze_reviews: called");

        let segments = segment(raw);
        if segments.is_empty() {
            info!("No reviews found in input");
            return Ok(AnalysisResult::error(NO_VALID_REVIEWS));
        }

        let mut labels = Vec::with_capacity(segments.len());
        let mut fallback_calls = 0;
        for (index, review) in segments.iter().enumerate() {
            if review.trim().chars().count() <= MIN_REVIEW_CHARS {
                debug!(index, "analyze_reviews: skipping short segment");
                continue;
            }
            let classified = self.classifier.classify(review).await?;
            if classified.fallback {
                fallback_calls += 1;
            }
            labels.push(classified.value);
        }

        let extracted = self.extractor.extract_insights(raw).await?;
        if extracted.fallback {
            fallback_calls += 1;
        }

        let summary = aggregate(&labels);
        let mut insights = extracted.value;
        insights.extend(summary.rule_insights);

        info!(
            segments = segments.len(),
            classified = labels.len(),
            fallback_calls,
            "Review analysis complete"
        );

        Ok(AnalysisResult::Report(ReviewReport {
            total_reviews: labels.len(),
            sentiment_distribution: summary.distribution,
            sentiment_percentages: summary.percentages,
            insights,
            fallback_calls,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::llm::client::mock::MockLlmClient;
    use crate::reviews::aggregate::{CONCERNING_NEGATIVE, OVERWHELMINGLY_POSITIVE, STRONG_POSITIVE};
    use crate::reviews::insights::INSIGHTS_UNAVAILABLE;

    fn analyzer(mock: Arc<MockLlmClient>) -> ReviewAnalyzer {
        ReviewAnalyzer::new(mock, Arc::new(PromptLoader::embedded_only()))
    }

    #[tokio::test]
    async fn test_blank_input_is_error_without_model_calls() {
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let result = analyzer(mock.clone()).analyze_reviews("  \n\n\t ").await.unwrap();

        assert_eq!(result, AnalysisResult::error(NO_VALID_REVIEWS));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_segments_are_not_classified() {
        // "Great" is 5 chars; the second review is well over 10
        let mock = Arc::new(MockLlmClient::texts(&["positive", "- Visitors enjoyed the harbour views"]));
        let raw = "Great\n\nThe harbour views from the room were absolutely stunning.";
        let result = analyzer(mock.clone()).analyze_reviews(raw).await.unwrap();

        let report = result.report().unwrap();
        assert_eq!(report.total_reviews, 1);
        assert_eq!(report.sentiment_distribution.positive, 1);
        assert_eq!(report.sentiment_percentages.positive, 100.0);
        assert_eq!(mock.call_count(), 2);
        assert!(mock.prompts()[0].contains("The harbour views"));
    }

    #[tokio::test]
    async fn test_exactly_ten_chars_is_skipped() {
        let mock = Arc::new(MockLlmClient::texts(&["Nothing useful"]));
        let result = analyzer(mock.clone()).analyze_reviews("0123456789").await.unwrap();

        let report = result.report().unwrap();
        assert_eq!(report.total_reviews, 0);
        assert_eq!(report.sentiment_percentages.positive, 0.0);
        // only the insight call
        assert_eq!(mock.call_count(), 1);
        assert!(report.insights.is_empty());
    }

    #[tokio::test]
    async fn test_insights_are_extracted_then_rule_based() {
        let mock = Arc::new(MockLlmClient::texts(&[
            "positive",
            "positive",
            "negative",
            "positive",
            "• Guests praise the breakfast\n• Rooms facing the street are loud",
        ]));
        let raw = "Breakfast was wonderful every day.\n\n\
                   Loved the rooftop bar and the view.\n\n\
                   Street-facing room was far too loud.\n\n\
                   Friendly staff and a great location.";
        let result = analyzer(mock.clone()).analyze_reviews(raw).await.unwrap();

        let report = result.report().unwrap();
        assert_eq!(report.total_reviews, 4);
        assert_eq!(report.sentiment_percentages.positive, 75.0);
        assert_eq!(
            report.insights,
            vec![
                "Guests praise the breakfast",
                "Rooms facing the street are loud",
                OVERWHELMINGLY_POSITIVE,
                STRONG_POSITIVE,
            ]
        );
        assert_eq!(report.fallback_calls, 0);
        // the extractor sees the raw text, blank lines included
        assert!(mock.prompts()[4].contains(raw));
    }

    #[tokio::test]
    async fn test_collaborator_failures_fall_back() {
        let mock = Arc::new(MockLlmClient::new(vec![
            Err(LlmError::Timeout(std::time::Duration::from_secs(1))),
            Ok(crate::llm::CompletionResponse::text("negative")),
            Err(LlmError::InvalidResponse("blocked".to_string())),
        ]));
        let raw = "1. The tour guide never showed up.\n2. Overpriced and dirty, avoid.";
        let result = analyzer(mock).analyze_reviews(raw).await.unwrap();

        let report = result.report().unwrap();
        assert_eq!(report.total_reviews, 2);
        assert_eq!(report.sentiment_distribution.neutral, 1);
        assert_eq!(report.sentiment_distribution.negative, 1);
        assert_eq!(report.fallback_calls, 2);
        assert_eq!(report.insights[0], INSIGHTS_UNAVAILABLE);
        assert_eq!(report.insights.len(), 2);
    }

    #[tokio::test]
    async fn test_majority_negative() {
        let mock = Arc::new(MockLlmClient::texts(&[
            "negative",
            "negative",
            "negative",
            "neutral",
            "positive",
            "Nothing stood out.",
        ]));
        let raw = "Cold food and slow service.\n\n\
                   Room smelled of smoke all week.\n\n\
                   Broken lift and no apology.\n\n\
                   It was an average stay overall.\n\n\
                   The pool area was lovely though.";
        let result = analyzer(mock).analyze_reviews(raw).await.unwrap();

        let report = result.report().unwrap();
        assert_eq!(report.sentiment_percentages.negative, 60.0);
        assert_eq!(report.insights, vec![CONCERNING_NEGATIVE]);
    }
}
