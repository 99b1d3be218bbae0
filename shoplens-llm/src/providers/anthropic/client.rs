//! Anthropic HTTP client

use super::types::ApiError;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shoplens_core::{LlmError, ShoplensError, ShoplensResult};
use std::time::Duration;

/// Anthropic API client.
///
/// Single-shot requests only: retries and backoff belong to the caller's
/// I/O policy, not this core.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given request timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com/v1".to_string(),
        }
    }

    /// Override the API base URL (for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make an API request.
    pub async fn request<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Req,
    ) -> ShoplensResult<Res> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ShoplensError::Llm(LlmError::RequestFailed {
                    provider: "anthropic".to_string(),
                    status: 0,
                    message: format!("HTTP request failed: {}", e),
                })
            })?;

        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ShoplensError::Llm(LlmError::InvalidResponse {
                    provider: "anthropic".to_string(),
                    reason: format!("failed to parse response: {}", e),
                })
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                api_error.error.message
            } else {
                error_text
            };

            Err(ShoplensError::Llm(LlmError::RequestFailed {
                provider: "anthropic".to_string(),
                status: status.as_u16() as i32,
                message: match status {
                    StatusCode::TOO_MANY_REQUESTS => format!("rate limited: {}", message),
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        format!("invalid api key: {}", message)
                    }
                    _ => message,
                },
            }))
        }
    }
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
