/*!
 * Identifier integrity checks.
 *
 * Internal addresses (passage headers), interactive-link destinations
 * and variable references are the identifiers the game runtime
 * navigates by; any divergence between source and candidate breaks
 * the script at play time. Whole-document checks always run; the
 * per-line variable check requires positional correspondence and is
 * gated on structural soundness.
 */

use std::collections::BTreeSet;

use crate::document::TweeDocument;
use crate::issue::{Issue, IssueCategory, Severity};
use crate::lexer::spans::variables;

/// How many set members to show before truncating a report line
const SET_DISPLAY_LIMIT: usize = 5;

/// Identifier integrity checker
pub struct IdentifierChecker;

impl IdentifierChecker {
    /// Whole-document checks; always safe to run
    pub fn check_document(source: &TweeDocument, candidate: &TweeDocument) -> Vec<Issue> {
        let mut issues = Vec::new();
        Self::check_passage_headers(source, candidate, &mut issues);
        Self::check_link_destinations(source, candidate, &mut issues);
        Self::check_variable_sets(source, candidate, &mut issues);
        issues
    }

    /// The ordered passage header lists must be identical in content
    /// and order. A single pass/fail verdict: one reordering already
    /// invalidates all downstream navigation, so headers are not
    /// itemized.
    fn check_passage_headers(
        source: &TweeDocument,
        candidate: &TweeDocument,
        issues: &mut Vec<Issue>,
    ) {
        let source_headers = source.passage_headers();
        let candidate_headers = candidate.passage_headers();
        if source_headers == candidate_headers {
            return;
        }

        let description = if source_headers.len() != candidate_headers.len() {
            format!(
                "Passage header mismatch: the source defines {} internal address(es) but the \
                 candidate has {}. Passage headers must never be translated, reordered or dropped.",
                source_headers.len(),
                candidate_headers.len()
            )
        } else {
            let first_diff = source_headers
                .iter()
                .zip(candidate_headers.iter())
                .find(|(s, c)| s != c)
                .map(|(s, c)| format!("first divergence: `{}` became `{}`", s, c))
                .unwrap_or_default();
            format!(
                "Passage header mismatch: internal addresses diverge from the source ({}). \
                 Passage headers must never be translated, reordered or dropped.",
                first_diff
            )
        };

        issues.push(Issue::global(
            Severity::Critical,
            IssueCategory::IdentifierIntegrity,
            description,
        ));
    }

    /// Link destinations are compared as sets; missing and newly
    /// introduced destinations are each reported once
    fn check_link_destinations(
        source: &TweeDocument,
        candidate: &TweeDocument,
        issues: &mut Vec<Issue>,
    ) {
        let source_dests = source.link_destinations();
        let candidate_dests = candidate.link_destinations();

        let missing: Vec<&String> = source_dests.difference(&candidate_dests).collect();
        let added: Vec<&String> = candidate_dests.difference(&source_dests).collect();

        if !missing.is_empty() {
            issues.push(Issue::global(
                Severity::Critical,
                IssueCategory::IdentifierIntegrity,
                format!(
                    "Link destination(s) missing from the candidate: {}",
                    truncated_display(&missing)
                ),
            ));
        }
        if !added.is_empty() {
            issues.push(Issue::global(
                Severity::Critical,
                IssueCategory::IdentifierIntegrity,
                format!(
                    "Link destination(s) not present in the source were introduced: {}",
                    truncated_display(&added)
                ),
            ));
        }
    }

    /// Whole-document variable reference sets must match; the
    /// comparison is symmetric (swapping the documents swaps the
    /// missing/added reports)
    fn check_variable_sets(
        source: &TweeDocument,
        candidate: &TweeDocument,
        issues: &mut Vec<Issue>,
    ) {
        let source_vars = source.variable_set();
        let candidate_vars = candidate.variable_set();

        let missing: Vec<&String> = source_vars.difference(&candidate_vars).collect();
        let added: Vec<&String> = candidate_vars.difference(&source_vars).collect();

        if !missing.is_empty() {
            issues.push(Issue::global(
                Severity::Critical,
                IssueCategory::IdentifierIntegrity,
                format!(
                    "Variable(s) missing from the candidate: {}",
                    truncated_display(&missing)
                ),
            ));
        }
        if !added.is_empty() {
            issues.push(Issue::global(
                Severity::Critical,
                IssueCategory::IdentifierIntegrity,
                format!(
                    "Variable(s) corrupted or added in the candidate: {}",
                    truncated_display(&added)
                ),
            ));
        }
    }

    /// Per-line variable comparison for an aligned line pair. Catches
    /// swaps that cancel out in the whole-document set comparison.
    /// Only valid when the documents are structurally sound.
    pub fn check_line_variables(
        line_num: usize,
        source_line: &str,
        candidate_line: &str,
    ) -> Option<Issue> {
        let source_vars: BTreeSet<&str> = variables(source_line).into_iter().collect();
        let candidate_vars: BTreeSet<&str> = variables(candidate_line).into_iter().collect();
        if source_vars == candidate_vars {
            return None;
        }

        let missing: Vec<&&str> = source_vars.difference(&candidate_vars).collect();
        let added: Vec<&&str> = candidate_vars.difference(&source_vars).collect();

        let mut description = "Variable references on this line differ from the source.".to_string();
        if !missing.is_empty() {
            description.push_str(&format!(
                " (missing: {})",
                missing.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
            ));
        }
        if !added.is_empty() {
            description.push_str(&format!(
                " (added/corrupted: {})",
                added.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
            ));
        }

        Some(
            Issue::at_line(
                Severity::Critical,
                IssueCategory::IdentifierIntegrity,
                line_num,
                description,
            )
            .with_snippets(source_line, candidate_line),
        )
    }
}

/// Sorted display of a set difference, truncated to the first few
fn truncated_display<T: std::fmt::Display>(items: &[T]) -> String {
    let shown: Vec<String> = items
        .iter()
        .take(SET_DISPLAY_LIMIT)
        .map(|i| format!("`{}`", i))
        .collect();
    if items.len() > SET_DISPLAY_LIMIT {
        format!("{} (+{} more)", shown.join(", "), items.len() - SET_DISPLAY_LIMIT)
    } else {
        shown.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> TweeDocument {
        TweeDocument::from_lines(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_passageHeaders_translatedHeader_shouldRaiseOneCritical() {
        let source = doc(&[":: Bird Hunt Intro", "text"]);
        let candidate = doc(&[":: 새 사냥 소개", "번역"]);
        let issues = IdentifierChecker::check_document(&source, &candidate);

        let header_issues: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.description.contains("Passage header mismatch"))
            .collect();
        assert_eq!(header_issues.len(), 1);
        assert_eq!(header_issues[0].severity, Severity::Critical);
        assert_eq!(header_issues[0].line_num, 0);
    }

    #[test]
    fn test_passageHeaders_identical_shouldPass() {
        let source = doc(&[":: A", "x", ":: B", "y"]);
        let candidate = doc(&[":: A", "엑스", ":: B", "와이"]);
        let issues = IdentifierChecker::check_document(&source, &candidate);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_passageHeaders_reordered_shouldFailEvenWithSameSet() {
        let source = doc(&[":: A", ":: B"]);
        let candidate = doc(&[":: B", ":: A"]);
        let issues = IdentifierChecker::check_document(&source, &candidate);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("first divergence"));
    }

    #[test]
    fn test_linkDestinations_translatedDestination_shouldReportBothSides() {
        let source = doc(&["[[Go|Bird Hunt]]"]);
        let candidate = doc(&["[[가자|새 사냥]]"]);
        let issues = IdentifierChecker::check_document(&source, &candidate);

        assert!(issues.iter().any(|i| i.description.contains("missing")
            && i.description.contains("Bird Hunt")));
        assert!(issues.iter().any(|i| i.description.contains("introduced")
            && i.description.contains("새 사냥")));
    }

    #[test]
    fn test_variableSets_symmetric_shouldSwapReports() {
        let left = doc(&["$alpha"]);
        let right = doc(&["$beta"]);

        let forward = IdentifierChecker::check_document(&left, &right);
        let backward = IdentifierChecker::check_document(&right, &left);

        let missing_forward = forward
            .iter()
            .find(|i| i.description.contains("missing"))
            .unwrap();
        let added_backward = backward
            .iter()
            .find(|i| i.description.contains("corrupted or added"))
            .unwrap();
        assert!(missing_forward.description.contains("$alpha"));
        assert!(added_backward.description.contains("$alpha"));
    }

    #[test]
    fn test_truncatedDisplay_shouldShowFirstFiveSorted() {
        let source = doc(&["[[a]] [[b]] [[c]] [[d]] [[e]] [[f]] [[g]]"]);
        let candidate = doc(&["plain text"]);
        let issues = IdentifierChecker::check_document(&source, &candidate);

        let missing = issues
            .iter()
            .find(|i| i.description.contains("missing"))
            .unwrap();
        assert!(missing.description.contains("`a`"));
        assert!(missing.description.contains("`e`"));
        assert!(!missing.description.contains("`f`"));
        assert!(missing.description.contains("+2 more"));
    }

    #[test]
    fn test_lineVariables_swapAcrossLines_shouldBeCaughtPerLine() {
        // $a and $b exchanged between two lines: global sets agree
        let issue1 = IdentifierChecker::check_line_variables(1, "x $a", "x $b");
        let issue2 = IdentifierChecker::check_line_variables(2, "y $b", "y $a");

        assert!(issue1.is_some());
        assert!(issue2.is_some());
        let issue = issue1.unwrap();
        assert_eq!(issue.line_num, 1);
        assert!(issue.description.contains("missing: $a"));
        assert!(issue.description.contains("added/corrupted: $b"));
    }

    #[test]
    fn test_lineVariables_matchingSets_shouldReturnNone() {
        assert!(IdentifierChecker::check_line_variables(1, "a $x b $y", "가 $y 나 $x").is_none());
    }
}
