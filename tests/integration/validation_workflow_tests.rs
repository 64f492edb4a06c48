/*!
 * End-to-end validation workflow tests
 */

use anyhow::Result;

use crate::common;
use tweeguard::app_config::ValidatorConfig;
use tweeguard::app_controller::Controller;
use tweeguard::document::TweeDocument;
use tweeguard::issue::{IssueCategory, Severity};
use tweeguard::validation::{Glossary, Validator};

fn validator() -> Validator {
    Validator::new(ValidatorConfig::default())
}

fn doc(text: &str) -> TweeDocument {
    TweeDocument::from_text(text)
}

#[test]
fn test_validate_faithfulTranslation_shouldPassWithGlossary() {
    let glossary = Glossary::parse(common::GLOSSARY);
    let report = validator()
        .with_glossary(glossary)
        .validate(&doc(common::SOURCE_TWEE), &doc(common::GOOD_CANDIDATE_TWEE));

    assert!(report.structurally_sound);
    assert_eq!(report.total(), 0, "unexpected issues: {:?}", report.issues);
}

#[test]
fn test_validate_selfAlignment_shouldAlwaysBeSound() {
    for text in [common::SOURCE_TWEE, common::GOOD_CANDIDATE_TWEE, "", "single line"] {
        let d = doc(text);
        let report = validator().validate(&d, &d);
        assert!(report.structurally_sound);
        assert!(
            !report
                .issues
                .iter()
                .any(|i| i.category == IssueCategory::StructuralMismatch)
        );
    }
}

#[test]
fn test_validate_translatedPassageHeader_shouldBeSingleCritical() {
    let candidate = common::GOOD_CANDIDATE_TWEE.replace(":: Bird Hunt Intro", ":: 새 사냥 소개");
    let report = validator().validate(&doc(common::SOURCE_TWEE), &doc(&candidate));

    let header_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.description.contains("Passage header mismatch"))
        .collect();
    assert_eq!(header_issues.len(), 1);
    assert_eq!(header_issues[0].severity, Severity::Critical);
    assert_eq!(header_issues[0].line_num, 0);
}

#[test]
fn test_validate_oneFewerLine_shouldReportFirstDivergingSourceLine() {
    // Drop the fourth line (first blank) from the candidate
    let mut lines: Vec<&str> = common::GOOD_CANDIDATE_TWEE.lines().collect();
    lines.remove(3);
    let candidate = lines.join("\n");

    let report = validator().validate(&doc(common::SOURCE_TWEE), &doc(&candidate));
    assert!(!report.structurally_sound);
    assert!(!report.passed());

    // Translated neighbor lines differ too, so the exact run split is
    // the diff's choice; the first structural finding still cites the
    // first diverging source line
    let structural: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.category == IssueCategory::StructuralMismatch)
        .collect();
    assert!(!structural.is_empty());
    assert_eq!(structural[0].line_num, 4);
    for issue in &structural {
        assert_eq!(issue.severity, Severity::Critical);
        assert!(issue.diff_text.is_some());
    }
}

#[test]
fn test_validate_macroLiteralTranslated_shouldCiteTheLiteral() {
    let source = doc(":: A\n<<npc \"Great Hawk\">> lands.\n");
    let candidate = doc(":: A\n<<npc \"거대 매\">> 내려앉는다.\n");

    let report = validator().validate(&source, &candidate);
    let macro_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.category == IssueCategory::MacroCorruption)
        .collect();
    assert_eq!(macro_issues.len(), 1);
    assert_eq!(macro_issues[0].severity, Severity::Critical);
    assert!(macro_issues[0].description.contains("거대 매"));
}

#[test]
fn test_validate_macroPreservedProseTranslated_shouldBeQuiet() {
    let source = doc("Might catch a <<trCreature \"struggle\" \"lurker\">>s or two.\n");
    let candidate = doc("<<trCreature \"struggle\" \"lurker\">> 한두 마리를 잡을지도 모른다.\n");

    let report = validator().validate(&source, &candidate);
    assert!(
        !report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::MacroCorruption)
    );
}

#[test]
fn test_validate_glossaryMisrendering_shouldWarn() {
    let glossary = Glossary::parse("Hawk : 매");
    let source = doc("The Hawk dives.\n");
    let candidate = doc("호크가 낙하한다.\n");

    let report = validator().with_glossary(glossary).validate(&source, &candidate);
    let glossary_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.category == IssueCategory::GlossaryCompliance)
        .collect();
    assert_eq!(glossary_issues.len(), 1);
    assert_eq!(glossary_issues[0].severity, Severity::Warning);
    assert!(glossary_issues[0].description.contains("mistranslated or missing"));
}

#[test]
fn test_variableSetComparison_shouldBeSymmetric() {
    let a = doc("has $alpha and $shared\n");
    let b = doc("has $beta and $shared\n");

    let forward = validator().validate(&a, &b);
    let backward = validator().validate(&b, &a);

    let forward_global: Vec<_> = forward
        .issues
        .iter()
        .filter(|i| i.line_num == 0 && i.category == IssueCategory::IdentifierIntegrity)
        .collect();
    let backward_global: Vec<_> = backward
        .issues
        .iter()
        .filter(|i| i.line_num == 0 && i.category == IssueCategory::IdentifierIntegrity)
        .collect();

    assert!(forward_global.iter().any(|i| i.description.contains("$alpha")));
    assert!(forward_global.iter().any(|i| i.description.contains("$beta")));
    assert!(backward_global.iter().any(|i| i.description.contains("$beta")));
    assert!(backward_global.iter().any(|i| i.description.contains("$alpha")));
}

#[test]
fn test_runValidate_directoryPair_shouldWriteReportPerFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source_dir = temp_dir.path().join("src");
    let candidate_dir = temp_dir.path().join("ko");
    let report_dir = temp_dir.path().join("reports");
    std::fs::create_dir_all(&source_dir)?;
    std::fs::create_dir_all(&candidate_dir)?;

    common::create_test_file(&source_dir, "hunt.twee", common::SOURCE_TWEE)?;
    common::create_test_file(&candidate_dir, "hunt.twee", common::GOOD_CANDIDATE_TWEE)?;
    common::create_test_file(&source_dir, "broken.twee", ":: A\nprose\n")?;
    common::create_test_file(&candidate_dir, "broken.twee", ":: B\n산문\n")?;

    let glossary_path = common::create_test_file(temp_dir.path(), "glossary.txt", common::GLOSSARY)?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run_validate(
        &source_dir,
        &candidate_dir,
        Some(&glossary_path),
        &report_dir,
    )?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);

    let good_report = std::fs::read_to_string(report_dir.join("hunt.validation.md"))?;
    assert!(good_report.contains("No issues found"));
    let bad_report = std::fs::read_to_string(report_dir.join("broken.validation.md"))?;
    assert!(bad_report.contains("Passage header mismatch"));
    Ok(())
}

#[test]
fn test_runValidate_missingGlossaryFile_shouldAbort() {
    let temp_dir = common::create_temp_dir().unwrap();
    let source = common::create_test_file(temp_dir.path(), "a.twee", common::SOURCE_TWEE).unwrap();
    let candidate =
        common::create_test_file(temp_dir.path(), "b.twee", common::GOOD_CANDIDATE_TWEE).unwrap();

    let controller = Controller::new_for_test().unwrap();
    let result = controller.run_validate(
        &source,
        &candidate,
        Some(temp_dir.path().join("missing.txt").as_path()),
        temp_dir.path(),
    );
    assert!(result.is_err());
}
