/*!
 * Issue model for validation findings.
 *
 * Every check appends `Issue` records to a single list owned by the
 * validator; a finding never aborts the run. Line numbers are 1-based
 * and refer to source positions; 0 means the issue applies to the
 * whole document.
 */

use std::fmt;

/// Severity of a validation issue, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The document is broken for the runtime that plays it
    Critical,
    /// Likely defect worth human review
    Warning,
    /// Minor observation, surfaced for completeness
    Info,
}

impl Severity {
    /// Marker used in rendered reports
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Critical => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "🔵",
        }
    }

    /// Uppercase label for log lines and reports
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Line insertions/deletions between source and candidate
    StructuralMismatch,
    /// Passage header, link destination or variable divergence
    IdentifierIntegrity,
    /// Translated text leaked into macro arguments
    MacroCorruption,
    /// Heuristic content quality flag
    ContentHeuristic,
    /// Unicode replacement character present
    EncodingCorruption,
    /// Mandated glossary term not applied
    GlossaryCompliance,
}

impl IssueCategory {
    /// Human-readable category name for reports
    pub fn name(&self) -> &'static str {
        match self {
            IssueCategory::StructuralMismatch => "Structural mismatch",
            IssueCategory::IdentifierIntegrity => "Identifier integrity",
            IssueCategory::MacroCorruption => "Macro corruption",
            IssueCategory::ContentHeuristic => "Content heuristic",
            IssueCategory::EncodingCorruption => "Encoding corruption",
            IssueCategory::GlossaryCompliance => "Glossary compliance",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single validation finding
#[derive(Debug, Clone)]
pub struct Issue {
    /// How severe the finding is
    pub severity: Severity,
    /// What kind of check produced it
    pub category: IssueCategory,
    /// 1-based source line, or 0 for whole-document findings
    pub line_num: usize,
    /// Description of the problem
    pub description: String,
    /// Source line snippet, when the finding is line-scoped
    pub original: Option<String>,
    /// Candidate line snippet, when the finding is line-scoped
    pub translated: Option<String>,
    /// Unified-diff-style excerpt for structural findings
    pub diff_text: Option<String>,
}

impl Issue {
    /// Create a whole-document issue (line 0)
    pub fn global(severity: Severity, category: IssueCategory, description: String) -> Self {
        Self {
            severity,
            category,
            line_num: 0,
            description,
            original: None,
            translated: None,
            diff_text: None,
        }
    }

    /// Create a line-scoped issue
    pub fn at_line(
        severity: Severity,
        category: IssueCategory,
        line_num: usize,
        description: String,
    ) -> Self {
        Self {
            severity,
            category,
            line_num,
            description,
            original: None,
            translated: None,
            diff_text: None,
        }
    }

    /// Attach source/candidate line snippets
    pub fn with_snippets(mut self, original: &str, translated: &str) -> Self {
        self.original = Some(original.to_string());
        self.translated = Some(translated.to_string());
        self
    }

    /// Attach a diff excerpt
    pub fn with_diff(mut self, diff_text: String) -> Self {
        self.diff_text = Some(diff_text);
        self
    }
}
