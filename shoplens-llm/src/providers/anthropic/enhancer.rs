//! Anthropic answer-enhancement provider

use super::client::AnthropicClient;
use super::types::{ContentBlock, Message, MessageRequest, MessageResponse};
use crate::AnswerEnhancer;
use async_trait::async_trait;
use shoplens_core::{LlmError, ShoplensError, ShoplensResult};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a business analytics assistant for an e-commerce store. \
     Rewrite the drafted answer in clear, friendly business language. \
     Keep every figure, product name, and recommendation exactly as given. \
     Do not add information that is not in the draft.";

/// Anthropic answer enhancer using Claude models.
#[derive(Debug)]
pub struct AnthropicEnhancer {
    client: AnthropicClient,
    model: String,
}

impl AnthropicEnhancer {
    /// Create a new Anthropic enhancer.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key
    /// * `model` - Model name (e.g. "claude-3-haiku-20240307")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: AnthropicClient::new(api_key, Duration::from_secs(10)),
            model: model.into(),
        }
    }

    /// Override the API base URL (for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(base_url);
        self
    }

    /// Extract text from content blocks.
    fn extract_text(content: Vec<ContentBlock>) -> String {
        content
            .into_iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl AnswerEnhancer for AnthropicEnhancer {
    async fn enhance(
        &self,
        draft: &str,
        question: &str,
        data_summary: &str,
    ) -> ShoplensResult<String> {
        let request = MessageRequest {
            model: self.model.clone(),
            system: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: format!(
                    "Question: {}\nData: {}\n\nDraft answer:\n{}",
                    question, data_summary, draft
                ),
            }],
            max_tokens: 512,
            temperature: Some(0.3),
        };

        let response: MessageResponse = self.client.request("messages", request).await?;
        let text = Self::extract_text(response.content);

        if text.trim().is_empty() {
            return Err(ShoplensError::Llm(LlmError::EnhancementFailed {
                reason: "empty completion".to_string(),
            }));
        }

        Ok(text)
    }
}
