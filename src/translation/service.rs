/*!
 * Bounded-concurrency translation of Twee documents.
 *
 * One service instance drives one provider. Oversized documents are
 * split at passage boundaries and the units are translated
 * concurrently under a counting semaphore with a per-request timeout;
 * reassembly preserves unit order. A unit whose request fails, times
 * out or comes back empty falls back to its original text, so the
 * caller must treat an unchanged result as a failed attempt rather
 * than a real candidate.
 */

use futures::StreamExt;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::app_config::TranslatorConfig;
use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};
use crate::translation::chunking::chunk_for_translation;
use crate::translation::prompt::{build_system_prompt, build_user_prompt};

/// Result of translating one document
#[derive(Debug)]
pub struct TranslationOutcome {
    /// The assembled candidate text
    pub text: String,
    /// Whether the candidate differs from the original. An unchanged
    /// result means every unit fell back and the attempt failed.
    pub changed: bool,
}

/// Translation driver over one provider
pub struct TranslationService {
    provider: Arc<dyn Provider>,
    semaphore: Arc<Semaphore>,
    concurrent_requests: usize,
    request_timeout: Duration,
    chunk_threshold_bytes: usize,
}

impl TranslationService {
    /// Create a service from the translator configuration
    pub fn new(provider: Arc<dyn Provider>, config: &TranslatorConfig) -> Self {
        let concurrent_requests = config.concurrent_requests.max(1);
        Self {
            provider,
            semaphore: Arc::new(Semaphore::new(concurrent_requests)),
            concurrent_requests,
            request_timeout: Duration::from_secs(config.timeout_secs),
            chunk_threshold_bytes: config.chunk_threshold_bytes,
        }
    }

    /// Translate a whole document. Splits at passage boundaries when
    /// the document exceeds the byte threshold; reassembly is a pure
    /// order-preserving concatenation.
    pub async fn translate_document(
        &self,
        content: &str,
        context_note: &str,
    ) -> TranslationOutcome {
        let units = chunk_for_translation(content, self.chunk_threshold_bytes);
        if units.len() > 1 {
            info!("Split document into {} passage unit(s)", units.len());
        }

        let translated: Vec<String> = futures::stream::iter(units)
            .map(|unit| {
                let note = context_note.to_string();
                async move { self.translate_unit(unit, &note).await }
            })
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        let text = translated.concat();
        let changed = text != content;
        TranslationOutcome { text, changed }
    }

    /// Translate one unit under the semaphore. Any failure falls back
    /// to the original text.
    async fn translate_unit(&self, unit: String, context_note: &str) -> String {
        // Semaphore is never closed, so acquire only fails on close
        let _permit = match self.semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return unit,
        };

        let request = TranslationRequest {
            system_prompt: build_system_prompt().to_string(),
            user_prompt: build_user_prompt(&unit, context_note),
        };

        match tokio::time::timeout(self.request_timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) => {
                if response.text.trim().is_empty() {
                    warn!(
                        "Provider returned an empty translation for a {} byte unit; keeping \
                         the original",
                        unit.len()
                    );
                    unit
                } else {
                    response.text
                }
            }
            Ok(Err(e)) => {
                warn!("Translation request failed: {}; keeping the original", e);
                unit
            }
            Err(_) => {
                warn!(
                    "Translation request failed: {}; keeping the original",
                    ProviderError::Timeout(self.request_timeout.as_secs())
                );
                unit
            }
        }
    }
}
