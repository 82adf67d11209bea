//! Anthropic Messages API client
//!
//! Selected with `llm.provider: anthropic`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::http::Connection;
use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
use crate::config::LlmConfig;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    conn: Connection,
}

impl AnthropicClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            conn: Connection::from_config(config)?,
        })
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(model = %self.conn.model, %request.max_tokens, "build_request_body: called");
        let mut body = serde_json::json!({
            "model": self.conn.model,
            "max_tokens": request.max_tokens.min(self.conn.max_tokens),
            "messages": request.messages,
        });

        if !request.system_prompt.is_empty() {
            body["system"] = serde_json::json!(request.system_prompt);
        }

        body
    }
}

/// Concatenate the text blocks; other block kinds are ignored
fn parse_response(api_response: MessagesResponse) -> CompletionResponse {
    let text: String = api_response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect();

    CompletionResponse {
        content: (!text.is_empty()).then_some(text),
        stop_reason: api_response
            .stop_reason
            .as_deref()
            .map(StopReason::from_anthropic)
            .unwrap_or(StopReason::EndTurn),
        usage: TokenUsage {
            input_tokens: api_response.usage.input_tokens,
            output_tokens: api_response.usage.output_tokens,
        },
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %self.conn.model, "complete: called");
        let body = self.build_request_body(&request);
        let http_request = self
            .conn
            .http
            .post(format!("{}/v1/messages", self.conn.base_url))
            .header("x-api-key", &self.conn.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let api_response: MessagesResponse = self.conn.send_json(http_request).await?;
        Ok(parse_response(api_response))
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_client(max_tokens: u32) -> AnthropicClient {
        AnthropicClient {
            conn: Connection {
                model: "claude-sonnet-4".to_string(),
                api_key: "test-key".to_string(),
                base_url: "https://api.anthropic.com".to_string(),
                max_tokens,
                timeout: Duration::from_secs(60),
                http: reqwest::Client::new(),
            },
        }
    }

    #[test]
    fn test_request_body_single_prompt() {
        let body = test_client(8192).build_request_body(&CompletionRequest::prompt("Hello", 1000));

        assert_eq!(body["model"], "claude-sonnet-4");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hello");
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_request_max_tokens_capped_by_config() {
        let body = test_client(1000).build_request_body(&CompletionRequest::prompt("Test", 5000));
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_parse_response_skips_non_text_blocks() {
        let raw = serde_json::json!({
            "content": [
                { "type": "thinking", "thinking": "hmm" },
                { "type": "text", "text": "negative" }
            ],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 40, "output_tokens": 2 }
        });
        let parsed: MessagesResponse = serde_json::from_value(raw).unwrap();
        let response = parse_response(parsed);

        assert_eq!(response.content.as_deref(), Some("negative"));
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.total(), 42);
    }
}
