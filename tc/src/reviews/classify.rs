//! Per-review sentiment classification via the language model

use std::sync::Arc;

use eyre::Result;
use serde::Serialize;
use tracing::{debug, warn};

use super::types::{Classified, SentimentLabel};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, PromptTemplate};

/// Token budget for a one-word answer, with headroom for chatty models
const SENTIMENT_MAX_TOKENS: u32 = 32;

#[derive(Serialize)]
struct SentimentPrompt<'a> {
    review: &'a str,
}

/// Asks the model for one sentiment word per review
pub struct SentimentClassifier {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
}

impl SentimentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>) -> Self {
        Self { llm, prompts }
    }

    /// Classify one review
    ///
    /// Collaborator failures never surface as errors: they are logged and the
    /// review is labelled Neutral with `fallback` set. Only a broken prompt
    /// template is reported as `Err`.
    pub async fn classify(&self, review: &str) -> Result<Classified<SentimentLabel>> {
        debug!(review_len = review.len(), "classify: called");
        let prompt = self.prompts.render(PromptTemplate::Sentiment, &SentimentPrompt { review })?;

        let outcome = match self.llm.complete(CompletionRequest::prompt(prompt, SENTIMENT_MAX_TOKENS)).await {
            Ok(response) => match response.content {
                Some(text) => {
                    let label = SentimentLabel::from_model_response(&text);
                    debug!(raw = %text.trim(), %label, "classify: model answered");
                    Classified::ok(label)
                }
                None => {
                    warn!("Error analyzing sentiment: empty model response");
                    Classified::fallback(SentimentLabel::Neutral)
                }
            },
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "Error analyzing sentiment");
                Classified::fallback(SentimentLabel::Neutral)
            }
        };

        Ok(outcome)
    }
}
