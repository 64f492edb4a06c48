/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations for text-rewriting
 * backends:
 * - OpenAi: any chat-completions compatible endpoint
 * - Mock: scripted behaviors for testing
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One translation request sent to a provider
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// System prompt carrying the localization rules
    pub system_prompt: String,
    /// User prompt carrying the document content and context note
    pub user_prompt: String,
}

/// Provider response
#[derive(Debug, Clone)]
pub struct TranslationResponse {
    /// The rewritten text
    pub text: String,
    /// Prompt tokens consumed, when the backend reports them
    pub prompt_tokens: Option<u64>,
    /// Completion tokens consumed, when the backend reports them
    pub completion_tokens: Option<u64>,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations
/// must follow, allowing them to be used interchangeably in the
/// translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a translation request
    async fn complete(&self, request: TranslationRequest)
        -> Result<TranslationResponse, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod mock;
pub mod openai;
