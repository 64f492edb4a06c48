/*!
 * Twee document model.
 *
 * A document is an immutable ordered sequence of lines. The source
 * document is ground truth and is never mutated; the auto-fixer
 * produces a new candidate document rather than rewriting in place.
 */

use crate::lexer::spans::{LINK_REGEX, variables};

/// An ordered sequence of Twee source lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweeDocument {
    lines: Vec<String>,
}

impl TweeDocument {
    /// Build a document from raw text, splitting on line breaks the
    /// same way on both sides of a comparison
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// Build a document from already-materialized lines
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Borrow the line sequence
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rejoin the document into text
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Ordered list of passage headers (internal addresses), each the
    /// full `:: Name` line
    pub fn passage_headers(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.starts_with(":: "))
            .map(|l| l.as_str())
            .collect()
    }

    /// Set of link-destination identifiers across the whole document:
    /// the second field of a two-part link, or the entire bracket
    /// content of a one-part link
    pub fn link_destinations(&self) -> std::collections::BTreeSet<String> {
        let mut destinations = std::collections::BTreeSet::new();
        for line in &self.lines {
            for m in LINK_REGEX.find_iter(line) {
                let inner = &line[m.start() + 2..m.end() - 2];
                let destination = match inner.split_once('|') {
                    Some((_, dest)) => dest,
                    None => inner,
                };
                destinations.insert(destination.to_string());
            }
        }
        destinations
    }

    /// Set of variable references across the whole document
    pub fn variable_set(&self) -> std::collections::BTreeSet<String> {
        let mut vars = std::collections::BTreeSet::new();
        for line in &self.lines {
            for v in variables(line) {
                vars.insert(v.to_string());
            }
        }
        vars
    }
}
