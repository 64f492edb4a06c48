/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with rewritten text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds but returns an empty response
 * - `MockProvider::echo()` - Returns the request content unchanged
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest, TranslationResponse};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a marker-prefixed rewrite
    Working,
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
    /// Returns the user prompt content unchanged
    Echo,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Simulates a slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslationRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that echoes the request content back
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a slow mock provider
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslationRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests this mock has received
    pub fn requests_received(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(generator) = self.custom_response {
            return Ok(TranslationResponse {
                text: generator(&request),
                prompt_tokens: Some(10),
                completion_tokens: Some(10),
            });
        }

        match self.behavior {
            MockBehavior::Working => Ok(TranslationResponse {
                text: format!("[번역됨] {}", request.user_prompt),
                prompt_tokens: Some(10),
                completion_tokens: Some(10),
            }),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Mock provider configured to fail".to_string(),
            )),
            MockBehavior::Empty => Ok(TranslationResponse {
                text: String::new(),
                prompt_tokens: Some(10),
                completion_tokens: Some(0),
            }),
            MockBehavior::Echo => Ok(TranslationResponse {
                text: request.user_prompt,
                prompt_tokens: Some(10),
                completion_tokens: Some(10),
            }),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(
                        "Mock intermittent failure".to_string(),
                    ))
                } else {
                    Ok(TranslationResponse {
                        text: format!("[번역됨] {}", request.user_prompt),
                        prompt_tokens: Some(10),
                        completion_tokens: Some(10),
                    })
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(TranslationResponse {
                    text: format!("[번역됨] {}", request.user_prompt),
                    prompt_tokens: Some(10),
                    completion_tokens: Some(10),
                })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Mock provider configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
