//! Planner error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from trip planning
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("Failed to render prompt: {0}")]
    Prompt(String),

    #[error("Failed to {action}: {source}")]
    Llm {
        action: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Failed to {action}: model returned no text")]
    EmptyResponse { action: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_message_names_action() {
        let err = PlannerError::Llm {
            action: "generate itinerary",
            source: LlmError::ApiError {
                status: 503,
                message: "overloaded".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to generate itinerary: "));
        assert!(msg.contains("overloaded"));
    }

    #[test]
    fn test_empty_response_message() {
        let err = PlannerError::EmptyResponse { action: "get travel tips" };
        assert_eq!(err.to_string(), "Failed to get travel tips: model returned no text");
    }
}
