/*!
 * Markdown rendering of validation and fix reports.
 */

use crate::autofix::FixReport;
use crate::issue::{Issue, Severity};
use crate::validation::ValidationReport;

/// Render a full validation report as a markdown document. Issues are
/// rendered in the order the report carries them (severity, then line).
pub fn render_validation_report(
    report: &ValidationReport,
    source_name: &str,
    candidate_name: &str,
) -> String {
    let mut out = String::new();

    out.push_str("# Translation Validation Report\n\n");
    out.push_str(&format!("- Source: `{}` ({} lines)\n", source_name, report.source_lines));
    out.push_str(&format!(
        "- Candidate: `{}` ({} lines)\n\n",
        candidate_name, report.candidate_lines
    ));

    out.push_str("## Summary\n\n");
    if report.total() == 0 {
        out.push_str("No issues found. ✅\n");
    } else {
        out.push_str(&format!("Total issues: **{}**\n\n", report.total()));
        for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
            let count = report.count(severity);
            if count > 0 {
                out.push_str(&format!("- {} {}: {}\n", severity.marker(), severity.label(), count));
            }
        }
    }
    if !report.structurally_sound {
        out.push_str(
            "\n> ⚠️ The documents differ in line count. Position-dependent checks \
             (per-line variables, macros, glossary) were skipped; only whole-document \
             and content checks ran.\n",
        );
    }
    out.push('\n');

    if report.total() > 0 {
        out.push_str("## Details\n\n");
        for issue in &report.issues {
            render_issue(&mut out, issue);
        }
    }

    out
}

fn render_issue(out: &mut String, issue: &Issue) {
    let location = if issue.line_num == 0 {
        "global".to_string()
    } else {
        format!("line {}", issue.line_num)
    };
    out.push_str(&format!(
        "### {} {} — {} ({})\n\n",
        issue.severity.marker(),
        issue.severity.label(),
        issue.category.name(),
        location
    ));
    out.push_str(&issue.description);
    out.push_str("\n\n");

    if let Some(diff) = &issue.diff_text {
        out.push_str("```diff\n");
        out.push_str(diff);
        if !diff.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n\n");
    }

    if let Some(original) = &issue.original {
        out.push_str(&format!("- Original: `{}`\n", original));
    }
    if let Some(translated) = &issue.translated {
        out.push_str(&format!("- Translated: `{}`\n", translated));
    }
    if issue.original.is_some() || issue.translated.is_some() {
        out.push('\n');
    }
}

/// Render the auto-fixer audit trail as a markdown document
pub fn render_fix_report(report: &FixReport, candidate_name: &str) -> String {
    let mut out = String::new();
    out.push_str("# Auto-Fix Report\n\n");
    out.push_str(&format!("- Candidate: `{}`\n", candidate_name));
    out.push_str(&format!("- Lines changed: **{}**\n\n", report.changed_lines()));

    if report.is_clean() {
        out.push_str("No mechanical corruption found; the document is unchanged.\n");
        return out;
    }

    for record in &report.records {
        out.push_str(&format!("### Line {}\n\n", record.line_num));
        out.push_str("```diff\n");
        out.push_str(&format!("- {}\n+ {}\n", record.before, record.after));
        out.push_str("```\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autofix::FixRecord;
    use crate::issue::{IssueCategory, Severity};

    fn empty_report() -> ValidationReport {
        ValidationReport {
            issues: vec![],
            structurally_sound: true,
            source_lines: 3,
            candidate_lines: 3,
        }
    }

    #[test]
    fn test_render_cleanRun_shouldSayNoIssues() {
        let text = render_validation_report(&empty_report(), "a.twee", "b.twee");
        assert!(text.contains("No issues found"));
        assert!(text.contains("`a.twee` (3 lines)"));
        assert!(!text.contains("## Details"));
    }

    #[test]
    fn test_render_issues_shouldCarrySeverityCountsAndDetails() {
        let mut report = empty_report();
        report.issues = vec![
            Issue::at_line(
                Severity::Critical,
                IssueCategory::MacroCorruption,
                12,
                "Macro code contains translated text".to_string(),
            )
            .with_snippets("<<npc \"Great Hawk\">>", "<<npc \"거대 매\">>"),
            Issue::global(
                Severity::Warning,
                IssueCategory::IdentifierIntegrity,
                "Missing link destinations".to_string(),
            ),
        ];

        let text = render_validation_report(&report, "a.twee", "b.twee");
        assert!(text.contains("Total issues: **2**"));
        assert!(text.contains("🔴 CRITICAL: 1"));
        assert!(text.contains("🟡 WARNING: 1"));
        assert!(text.contains("(line 12)"));
        assert!(text.contains("(global)"));
        assert!(text.contains("- Original: `<<npc \"Great Hawk\">>`"));
    }

    #[test]
    fn test_render_unsoundRun_shouldCarrySkipNotice() {
        let mut report = empty_report();
        report.structurally_sound = false;
        report.candidate_lines = 2;

        let text = render_validation_report(&report, "a.twee", "b.twee");
        assert!(text.contains("Position-dependent checks"));
        assert!(text.contains("were skipped"));
    }

    #[test]
    fn test_render_diffExcerpt_shouldBeFenced() {
        let mut report = empty_report();
        report.issues = vec![
            Issue::at_line(
                Severity::Critical,
                IssueCategory::StructuralMismatch,
                3,
                "1 line(s) deleted".to_string(),
            )
            .with_diff("  context\n- deleted line\n  context".to_string()),
        ];

        let text = render_validation_report(&report, "a.twee", "b.twee");
        assert!(text.contains("```diff\n  context\n- deleted line\n  context\n```"));
    }

    #[test]
    fn test_renderFixReport_shouldListChangedLines() {
        let report = FixReport {
            records: vec![FixRecord {
                line_num: 4,
                before: "</if>>".to_string(),
                after: "<</if>>".to_string(),
            }],
        };

        let text = render_fix_report(&report, "b.twee");
        assert!(text.contains("Lines changed: **1**"));
        assert!(text.contains("### Line 4"));
        assert!(text.contains("- </if>>\n+ <</if>>"));
    }

    #[test]
    fn test_renderFixReport_cleanPass_shouldSayUnchanged() {
        let text = render_fix_report(&FixReport::default(), "b.twee");
        assert!(text.contains("unchanged"));
    }
}
