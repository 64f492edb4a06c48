/*!
 * Auto-fix then re-validate workflow tests
 */

use anyhow::Result;

use crate::common;
use tweeguard::app_config::ValidatorConfig;
use tweeguard::app_controller::Controller;
use tweeguard::autofix::AutoFixer;
use tweeguard::document::TweeDocument;
use tweeguard::issue::IssueCategory;
use tweeguard::validation::Validator;

const SOURCE: &str = ":: Ending
<<if $bird.hunts gte 1>>The hawk is yours.<</if>>
<<nnpc_He \"Avery\">> smiles.
";

const CORRUPTED: &str = ":: Ending
<<if $bird.hunts gte 1>>매는 당신의 것이다.</if>>
<<nnpc_He \"Avery\"는>> 미소 짓는다.
";

#[test]
fn test_fixThenRevalidate_shouldClearMacroCriticals() {
    let source = TweeDocument::from_text(SOURCE);
    let corrupted = TweeDocument::from_text(CORRUPTED);
    let validator = Validator::new(ValidatorConfig::default());

    // Before fixing: the broken closing tag makes macro counts diverge
    let before = validator.validate(&source, &corrupted);
    assert!(
        before
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::MacroCorruption)
    );

    let (fixed, fix_report) = AutoFixer::fix(&corrupted);
    assert_eq!(fix_report.changed_lines(), 2);

    let after = validator.validate(&source, &fixed);
    assert!(
        !after
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::MacroCorruption),
        "unexpected issues after fixing: {:?}",
        after.issues
    );
}

#[test]
fn test_fixer_isIdempotentAcrossFullDocuments() {
    let corrupted = TweeDocument::from_text(CORRUPTED);
    let (once, _) = AutoFixer::fix(&corrupted);
    let (twice, second_report) = AutoFixer::fix(&once);

    assert!(second_report.is_clean());
    assert_eq!(once.lines(), twice.lines());
}

#[test]
fn test_fixer_neverTouchesCleanDocuments() {
    let clean = TweeDocument::from_text(common::GOOD_CANDIDATE_TWEE);
    let (fixed, report) = AutoFixer::fix(&clean);
    assert!(report.is_clean());
    assert_eq!(fixed.text(), clean.text());
}

#[test]
fn test_runFix_endToEnd_shouldEmitFixedFileAndReports() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_dir = temp_dir.path().join("fixed");
    let source = common::create_test_file(temp_dir.path(), "ending.twee", SOURCE)?;
    let candidate = common::create_test_file(temp_dir.path(), "ending.ko.twee", CORRUPTED)?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run_fix(&source, &candidate, None, &out_dir)?;
    assert_eq!(summary.processed, 1);

    let fixed_text = std::fs::read_to_string(out_dir.join("ending.ko.twee"))?;
    assert!(fixed_text.contains("<</if>>"));
    assert!(!fixed_text.contains("것이다.</if>>"));

    let fix_report = std::fs::read_to_string(out_dir.join("ending.ko.fixes.md"))?;
    assert!(fix_report.contains("Lines changed: **2**"));

    let validation_report = std::fs::read_to_string(out_dir.join("ending.ko.validation.md"))?;
    assert!(!validation_report.contains("Macro"));
    Ok(())
}
