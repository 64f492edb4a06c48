/*!
 * Translation pipeline tests over mock providers
 */

use anyhow::Result;
use std::sync::Arc;

use crate::common;
use tweeguard::app_config::TranslatorConfig;
use tweeguard::app_controller::Controller;
use tweeguard::providers::mock::MockProvider;
use tweeguard::providers::{Provider, TranslationRequest};
use tweeguard::translation::{TranslationService, split_passages};

/// Pull the embedded document content back out of the user prompt
fn embedded_content(request: &TranslationRequest) -> String {
    let start = request.user_prompt.find("<# Sample_Text>\n").unwrap() + 16;
    let end = request.user_prompt.find("\n</# Sample_Text>").unwrap();
    request.user_prompt[start..end].to_string()
}

#[tokio::test]
async fn test_pipeline_chunkedTranslation_shouldPreservePassageOrder() {
    // Force per-passage chunking and echo each unit back marked; the
    // reassembled document must keep the original passage order
    let config = TranslatorConfig {
        chunk_threshold_bytes: 16,
        timeout_secs: 5,
        ..TranslatorConfig::default()
    };
    let provider =
        MockProvider::failing().with_custom_response(|r| embedded_content(r).to_uppercase());
    let service = TranslationService::new(Arc::new(provider), &config);

    let content = ":: alpha\none\n:: bravo\ntwo\n:: charlie\nthree\n";
    let outcome = service.translate_document(content, "note").await;

    assert!(outcome.changed);
    assert_eq!(outcome.text, content.to_uppercase());

    let units = split_passages(content);
    assert_eq!(units.len(), 3);
    assert_eq!(units.concat(), content);
}

#[tokio::test]
async fn test_pipeline_allUnitsFail_shouldReturnOriginalUnchanged() {
    let config = TranslatorConfig {
        chunk_threshold_bytes: 16,
        timeout_secs: 5,
        ..TranslatorConfig::default()
    };
    let service = TranslationService::new(Arc::new(MockProvider::failing()), &config);

    let content = ":: alpha\none\n:: bravo\ntwo\n";
    let outcome = service.translate_document(content, "note").await;

    assert!(!outcome.changed);
    assert_eq!(outcome.text, content);
}

#[tokio::test]
async fn test_pipeline_requestVolume_shouldMatchUnitCount() {
    let config = TranslatorConfig {
        chunk_threshold_bytes: 16,
        timeout_secs: 5,
        ..TranslatorConfig::default()
    };
    let provider = Arc::new(MockProvider::echo());
    let service = TranslationService::new(provider.clone(), &config);

    let content = ":: alpha\none\n:: bravo\ntwo\n:: charlie\nthree\n";
    let _ = service.translate_document(content, "note").await;

    assert_eq!(provider.requests_received(), 3);
}

#[tokio::test]
async fn test_runTranslate_directory_shouldWriteCandidatesAndReports() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source_dir = temp_dir.path().join("src");
    let out_dir = temp_dir.path().join("translated");
    std::fs::create_dir_all(&source_dir)?;
    common::create_test_file(&source_dir, "hunt.twee", common::SOURCE_TWEE)?;

    // A provider that produces the known-good translation
    let provider = MockProvider::failing()
        .with_custom_response(|_| common::GOOD_CANDIDATE_TWEE.to_string());

    let controller = Controller::new_for_test()?;
    let summary = controller
        .run_translate_with_provider(Arc::new(provider), &source_dir, None, &out_dir, false)
        .await?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("hunt.twee"))?,
        common::GOOD_CANDIDATE_TWEE
    );
    let report = std::fs::read_to_string(out_dir.join("hunt.validation.md"))?;
    assert!(report.contains("No issues found"));
    Ok(())
}

#[tokio::test]
async fn test_runTranslate_unchangedOutput_shouldCountAsFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_dir = temp_dir.path().join("translated");
    let source = common::create_test_file(temp_dir.path(), "hunt.twee", common::SOURCE_TWEE)?;

    let controller = Controller::new_for_test()?;
    let summary = controller
        .run_translate_with_provider(
            Arc::new(MockProvider::empty()),
            &source,
            None,
            &out_dir,
            false,
        )
        .await?;

    assert_eq!(summary.failed, 1);
    assert!(!out_dir.join("hunt.twee").exists());
    Ok(())
}

#[tokio::test]
async fn test_mockProvider_connectionContract() {
    assert!(MockProvider::working().test_connection().await.is_ok());
    assert!(MockProvider::failing().test_connection().await.is_err());
}
