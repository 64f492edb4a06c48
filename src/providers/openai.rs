use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest, TranslationResponse};

/// Client for any chat-completions compatible API
#[derive(Debug)]
pub struct OpenAi {
    /// HTTP client for API requests
    client: Client,
    /// Full endpoint URL of the chat-completions route
    endpoint: String,
    /// API key for authentication; empty for local servers
    api_key: String,
    /// Model name to request
    model: String,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    stream: bool,
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Token usage information
#[derive(Debug, Deserialize)]
struct TokenUsage {
    #[serde(default)]
    prompt_tokens: Option<u64>,
    #[serde(default)]
    completion_tokens: Option<u64>,
}

impl OpenAi {
    /// Create a new client. The endpoint must be a complete
    /// chat-completions URL.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid endpoint URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
            max_retries: 3,
            backoff_base_ms: 1000,
        })
    }

    /// Override the retry policy
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    async fn send_once(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(
                "the endpoint returned HTTP 429".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Chat API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();
        let (prompt_tokens, completion_tokens) = parsed
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((None, None));

        Ok(TranslationResponse {
            text,
            prompt_tokens,
            completion_tokens,
        })
    }
}

#[async_trait]
impl Provider for OpenAi {
    /// Complete with retry on transient failures. Client errors other
    /// than rate limiting are returned immediately.
    async fn complete(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
            temperature: Some(0.1),
            top_p: Some(0.7),
            stream: false,
        };

        let mut attempt = 0;
        let mut last_error = None;
        while attempt <= self.max_retries {
            match self.send_once(&body).await {
                Ok(response) => return Ok(response),
                Err(ProviderError::ApiError {
                    status_code,
                    message,
                }) if status_code < 500 => {
                    return Err(ProviderError::ApiError {
                        status_code,
                        message,
                    });
                }
                Err(e) => {
                    error!(
                        "Chat API request failed: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(e);
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = TranslationRequest {
            system_prompt: "You are a test.".to_string(),
            user_prompt: "Reply with OK.".to_string(),
        };
        self.complete(request).await?;
        Ok(())
    }
}
