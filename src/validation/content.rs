/*!
 * Content heuristic checks.
 *
 * These run on every classified candidate line, independent of
 * structural soundness: unplayable or untranslated link text,
 * untranslated prose ratio, forbidden bilingual parentheticals and
 * encoding corruption. They flag likely translation-quality defects
 * with calibrated severities rather than hard failures.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::ValidatorConfig;
use crate::issue::{Issue, IssueCategory, Severity};
use crate::lexer::classify::{LineClass, classify, is_content_bearing};
use crate::lexer::spans::{contains_korean, links, pure_text};

/// Ascii letters, digits, punctuation and spaces only
static ASCII_ONLY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\x20-\x7E]+$").expect("Invalid ascii-only regex")
});

/// Hangul immediately followed by a parenthesized ascii run:
/// `안녕하세요 (Hello)`, the forbidden original-language gloss
static BILINGUAL_PAREN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[가-힣]\s*\([A-Za-z][A-Za-z0-9 ,.'!?-]*\)").expect("Invalid paren regex")
});

/// Content heuristic checker
pub struct ContentChecker {
    link_word_threshold: usize,
    english_ratio_threshold: f64,
}

impl ContentChecker {
    /// Create a checker from validator thresholds
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            link_word_threshold: config.untranslated_link_word_threshold,
            english_ratio_threshold: config.english_ratio_threshold,
        }
    }

    /// Run all content checks on one candidate line. `source_line` is
    /// the positionally corresponding source line when the documents
    /// are structurally sound, else `None`.
    pub fn check_line(
        &self,
        line_num: usize,
        source_line: Option<&str>,
        candidate_line: &str,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        self.check_encoding(line_num, candidate_line, &mut issues);
        self.check_links(line_num, candidate_line, &mut issues);

        let class = classify(candidate_line);
        if is_content_bearing(class) {
            self.check_untranslated_ratio(line_num, source_line, candidate_line, class, &mut issues);
            self.check_bilingual_parenthetical(line_num, candidate_line, &mut issues);
        }

        issues
    }

    /// U+FFFD anywhere is encoding corruption, independent of the
    /// line classification
    fn check_encoding(&self, line_num: usize, candidate_line: &str, issues: &mut Vec<Issue>) {
        if candidate_line.contains('\u{FFFD}') {
            issues.push(Issue::at_line(
                Severity::Critical,
                IssueCategory::EncodingCorruption,
                line_num,
                "Unicode replacement character (U+FFFD) found; the text was corrupted during \
                 encoding or transfer."
                    .to_string(),
            ));
        }
    }

    /// Empty or untranslated link display text
    fn check_links(&self, line_num: usize, candidate_line: &str, issues: &mut Vec<Issue>) {
        for link in links(candidate_line) {
            let residue = pure_text(link.display);
            let residue = residue.trim();

            if residue.is_empty() {
                issues.push(Issue::at_line(
                    Severity::Warning,
                    IssueCategory::ContentHeuristic,
                    line_num,
                    format!(
                        "Unplayable empty interactive element: link to `{}` has no visible text.",
                        link.destination
                    ),
                ));
                continue;
            }

            if ASCII_ONLY_REGEX.is_match(residue) {
                let word_count = residue.split_whitespace().count();
                if word_count == 0 {
                    continue;
                }
                let severity = if word_count >= self.link_word_threshold {
                    Severity::Warning
                } else {
                    Severity::Info
                };
                issues.push(Issue::at_line(
                    severity,
                    IssueCategory::ContentHeuristic,
                    line_num,
                    format!(
                        "Link text `{}` appears untranslated ({} word(s) of plain ascii).",
                        residue, word_count
                    ),
                ));
            }
        }
    }

    /// Prose lines with no Hangul at all, dominated by ascii words
    fn check_untranslated_ratio(
        &self,
        line_num: usize,
        source_line: Option<&str>,
        candidate_line: &str,
        _class: LineClass,
        issues: &mut Vec<Issue>,
    ) {
        let residue = pure_text(candidate_line);
        if contains_korean(&residue) {
            return;
        }

        let words: Vec<&str> = residue.split_whitespace().collect();
        if words.is_empty() {
            return;
        }
        let ascii_words = words
            .iter()
            .filter(|w| w.is_ascii() && !w.chars().all(|c| !c.is_alphabetic()))
            .count();
        let ratio = ascii_words as f64 / words.len() as f64;
        if ratio < self.english_ratio_threshold {
            return;
        }

        // Byte-identical to the source means clearly untranslated;
        // without positional correspondence the weaker verdict applies
        let byte_identical = source_line.is_some_and(|s| s == candidate_line);
        let severity = if byte_identical {
            Severity::Warning
        } else {
            Severity::Info
        };
        let mut issue = Issue::at_line(
            severity,
            IssueCategory::ContentHeuristic,
            line_num,
            format!(
                "Line appears untranslated: {:.0}% of its words are plain ascii and no target-\
                 language text is present.",
                ratio * 100.0
            ),
        );
        if let Some(source_line) = source_line {
            issue = issue.with_snippets(source_line, candidate_line);
        }
        issues.push(issue);
    }

    /// Target-script text immediately followed by an ascii run in
    /// parentheses violates the no-gloss rule
    fn check_bilingual_parenthetical(
        &self,
        line_num: usize,
        candidate_line: &str,
        issues: &mut Vec<Issue>,
    ) {
        if let Some(m) = BILINGUAL_PAREN_REGEX.find(candidate_line) {
            issues.push(Issue::at_line(
                Severity::Warning,
                IssueCategory::ContentHeuristic,
                line_num,
                format!(
                    "Forbidden bilingual parenthetical `{}`: the original text must not be \
                     kept in parentheses next to the translation.",
                    m.as_str()
                ),
            ));
        }
    }
}
