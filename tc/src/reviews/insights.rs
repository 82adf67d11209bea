//! Free-text insight extraction via the language model

use std::sync::Arc;

use eyre::Result;
use serde::Serialize;
use tracing::{debug, warn};

use super::types::Classified;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, PromptTemplate};

/// Most model-derived insights kept per analysis
pub const MAX_INSIGHTS: usize = 7;

/// Returned in place of insights when the model call fails
pub const INSIGHTS_UNAVAILABLE: &str = "Unable to generate insights from reviews";

const INSIGHTS_MAX_TOKENS: u32 = 1024;

/// Un-bulleted lines need more words than this to count as an insight
const MIN_SENTENCE_WORDS: usize = 3;

#[derive(Serialize)]
struct InsightsPrompt<'a> {
    reviews: &'a str,
}

/// Asks the model for a handful of bullet-point takeaways about all reviews
pub struct InsightExtractor {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
}

impl InsightExtractor {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self { llm, prompts }
    }

    /// Extract at most [`MAX_INSIGHTS`] insights from the full review text
    ///
    /// On collaborator failure the single [`INSIGHTS_UNAVAILABLE`] message is
    /// returned with `fallback` set.
    pub async fn extract_insights(&self, full_text: &str) -> Result<Classified<Vec<String>>> {
        debug!(text_len = full_text.len(), "extract_insights: called");
        let prompt = self
            .prompts
            .render(PromptTemplate::Insights, &InsightsPrompt { reviews: full_text })?;

        let outcome = match self.llm.complete(CompletionRequest::prompt(prompt, INSIGHTS_MAX_TOKENS)).await {
            Ok(response) => match response.content {
                Some(text) => {
                    let insights = parse_insights(&text);
                    debug!(count = insights.len(), "extract_insights: parsed insights");
                    Classified::ok(insights)
                }
                None => {
                    warn!("Error getting insights: empty model response");
                    Classified::fallback(vec![INSIGHTS_UNAVAILABLE.to_string()])
                }
            },
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "Error getting insights");
                Classified::fallback(vec![INSIGHTS_UNAVAILABLE.to_string()])
            }
        };

        Ok(outcome)
    }
}

/// Pull insight lines out of a free-text model answer
///
/// Bulleted lines (`•`, `-`, `*`) are kept with the bullet stripped; other
/// lines are kept when they have more than three words. Order is preserved and
/// the result is capped at [`MAX_INSIGHTS`].
pub fn parse_insights(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            if line.starts_with(['•', '-', '*']) {
                let insight = line.trim_start_matches(['•', '-', '*', ' ']).trim();
                (!insight.is_empty()).then(|| insight.to_string())
            } else if line.split_whitespace().count() > MIN_SENTENCE_WORDS {
                Some(line.to_string())
            } else {
                None
            }
        })
        .take(MAX_INSIGHTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::llm::client::mock::MockLlmClient;

    #[test]
    fn test_parse_bullets_and_sentences() {
        let text = "Key insights:\n\
                    • Visitors love the beachfront location\n\
                    - Breakfast is frequently praised\n\
                    * Wi-Fi is unreliable in upper floors\n\
                    \n\
                    Overall the hotel is good value for families.\n\
                    Short line here";
        assert_eq!(
            parse_insights(text),
            vec![
                "Visitors love the beachfront location",
                "Breakfast is frequently praised",
                "Wi-Fi is unreliable in upper floors",
                "Overall the hotel is good value for families.",
            ]
        );
    }

    #[test]
    fn test_parse_strips_stacked_markers() {
        assert_eq!(parse_insights("** Book early in summer"), vec!["Book early in summer"]);
        assert_eq!(parse_insights("  -   Indented bullet  "), vec!["Indented bullet"]);
    }

    #[test]
    fn test_parse_drops_bare_markers() {
        assert!(parse_insights("-\n•\n* ").is_empty());
    }

    #[test]
    fn test_parse_word_threshold_is_strictly_more_than_three() {
        assert!(parse_insights("Three words only").is_empty());
        assert!(parse_insights("Exactly three words?").is_empty());
        assert_eq!(parse_insights("Now four words here"), vec!["Now four words here"]);
    }

    #[test]
    fn test_parse_caps_at_seven() {
        let text = (1..=12).map(|i| format!("- Insight number {}", i)).collect::<Vec<_>>().join("\n");
        let insights = parse_insights(&text);
        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert_eq!(insights[0], "Insight number 1");
        assert_eq!(insights[6], "Insight number 7");
    }

    #[tokio::test]
    async fn test_extract_uses_full_text_in_prompt() {
        let mock = Arc::new(MockLlmClient::texts(&["- Friendly staff\n- Noisy street"]));
        let extractor = InsightExtractor::new(mock.clone(), Arc::new(PromptLoader::embedded_only()));

        let result = extractor.extract_insights("Nice.\n\nLoud at night.").await.unwrap();
        assert_eq!(result, Classified::ok(vec!["Friendly staff".to_string(), "Noisy street".to_string()]));
        assert!(mock.prompts()[0].contains("Reviews:\nNice.\n\nLoud at night."));
    }

    #[tokio::test]
    async fn test_extract_failure_returns_placeholder() {
        let mock = Arc::new(MockLlmClient::new(vec![Err(LlmError::InvalidResponse("bad".to_string()))]));
        let extractor = InsightExtractor::new(mock, Arc::new(PromptLoader::embedded_only()));

        let result = extractor.extract_insights("Anything").await.unwrap();
        assert_eq!(result, Classified::fallback(vec![INSIGHTS_UNAVAILABLE.to_string()]));
    }
}
