/*!
 * Validation service that orchestrates all checkers.
 *
 * One validator instance processes one source/candidate pair and owns
 * one append-only issue list; every check is best-effort and
 * exhaustive; a finding never aborts the run. The structural aligner
 * runs first and gates the checks that require positional
 * correspondence.
 */

use log::{debug, warn};

use crate::app_config::ValidatorConfig;
use crate::document::TweeDocument;
use crate::issue::{Issue, Severity};
use crate::lexer::classify::{classify, is_content_bearing};
use crate::lexer::spans::pure_text;
use crate::validation::alignment::StructuralAligner;
use crate::validation::content::ContentChecker;
use crate::validation::glossary::Glossary;
use crate::validation::identifiers::IdentifierChecker;
use crate::validation::macros::MacroChecker;
use crate::validation::tokenizer::{KoreanTokenizer, TargetTokenizer};

/// Complete result of a validation run
#[derive(Debug)]
pub struct ValidationReport {
    /// All findings, ordered by severity then line number
    pub issues: Vec<Issue>,
    /// Whether positional checks were safe to run
    pub structurally_sound: bool,
    /// Source line count
    pub source_lines: usize,
    /// Candidate line count
    pub candidate_lines: usize,
}

impl ValidationReport {
    /// Total number of findings
    pub fn total(&self) -> usize {
        self.issues.len()
    }

    /// Number of findings at a given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Whether the candidate is playable: no Critical findings
    pub fn passed(&self) -> bool {
        self.count(Severity::Critical) == 0
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} issue(s): {} critical, {} warning, {} info",
            self.total(),
            self.count(Severity::Critical),
            self.count(Severity::Warning),
            self.count(Severity::Info)
        )
    }
}

/// Validator for one source/candidate document pair
pub struct Validator {
    config: ValidatorConfig,
    glossary: Option<Glossary>,
    tokenizer: Box<dyn TargetTokenizer>,
}

impl Validator {
    /// Create a validator with the default Korean tokenizer
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            glossary: None,
            tokenizer: Box::new(KoreanTokenizer::new()),
        }
    }

    /// Attach a glossary for compliance checking
    pub fn with_glossary(mut self, glossary: Glossary) -> Self {
        self.glossary = Some(glossary);
        self
    }

    /// Substitute the target-language tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn TargetTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Run every applicable check and return the accumulated issues,
    /// sorted by severity then line number
    pub fn validate(&self, source: &TweeDocument, candidate: &TweeDocument) -> ValidationReport {
        let mut issues: Vec<Issue> = Vec::new();

        // Alignment gates everything position-dependent
        let aligner = StructuralAligner::new(self.config.context_lines);
        let outcome = aligner.align(source, candidate);
        let sound = outcome.structurally_sound;
        issues.extend(outcome.issues);

        if !sound {
            warn!(
                "Documents are not structurally sound (source: {} lines, candidate: {}); \
                 per-line checks skipped",
                source.line_count(),
                candidate.line_count()
            );
        }

        // Whole-document identifier checks always run
        issues.extend(IdentifierChecker::check_document(source, candidate));

        // Content heuristics run on every candidate line; without
        // positional correspondence the line reference degrades to 0
        let content_checker = ContentChecker::new(&self.config);
        for (index, candidate_line) in candidate.lines().iter().enumerate() {
            let (line_num, source_line) = if sound {
                (index + 1, Some(source.lines()[index].as_str()))
            } else {
                (0, None)
            };
            issues.extend(content_checker.check_line(line_num, source_line, candidate_line));
        }

        // Position-dependent checks only when sound
        if sound {
            for (index, (source_line, candidate_line)) in source
                .lines()
                .iter()
                .zip(candidate.lines().iter())
                .enumerate()
            {
                let line_num = index + 1;

                if let Some(issue) =
                    IdentifierChecker::check_line_variables(line_num, source_line, candidate_line)
                {
                    issues.push(issue);
                }

                issues.extend(MacroChecker::check_line(line_num, source_line, candidate_line));

                if let Some(glossary) = &self.glossary {
                    if is_content_bearing(classify(source_line)) {
                        let source_residue = pure_text(source_line);
                        let candidate_residue = pure_text(candidate_line);
                        issues.extend(glossary.check_line(
                            line_num,
                            source_line,
                            candidate_line,
                            &source_residue,
                            &candidate_residue,
                            self.tokenizer.as_ref(),
                        ));
                    }
                }
            }
        }

        issues.sort_by(|a, b| a.severity.cmp(&b.severity).then(a.line_num.cmp(&b.line_num)));

        debug!(
            "Validation complete: {} issue(s), structurally sound: {}",
            issues.len(),
            sound
        );

        ValidationReport {
            issues,
            structurally_sound: sound,
            source_lines: source.line_count(),
            candidate_lines: candidate.line_count(),
        }
    }
}
