/*!
 * Glossary compliance engine.
 *
 * A term list maps source terms to mandated target-language
 * renderings. Every term registers itself plus case-folded and
 * capitalized variants into one multi-pattern matcher, built once per
 * run. Compliance is checked per structurally-aligned line: the
 * source residue is scanned for terms, and the candidate residue must
 * carry the mandated value as an exact morpheme or literal substring
 * and never substring-fuzzy. The mandated value itself is code, not
 * prose, and is never subject to translation checks.
 */

use anyhow::{Context, Result, anyhow};
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;

use crate::issue::{Issue, IssueCategory, Severity};
use crate::validation::matcher::TermMatcher;
use crate::validation::tokenizer::TargetTokenizer;

/// One glossary rule: source term and mandated target rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    /// Term as written in the term list
    pub source_term: String,
    /// Mandated target-language rendering
    pub target_term: String,
}

/// Glossary with a prebuilt multi-pattern matcher over all key variants
#[derive(Debug)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    /// Pattern index -> entry index; several variants share one entry
    variant_entries: Vec<usize>,
    matcher: TermMatcher,
}

impl Glossary {
    /// Parse a term-list resource: one `sourceTerm : mandatedTargetTerm`
    /// per line, `#`-prefixed comments and blank lines ignored,
    /// malformed lines skipped.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((source, target)) = line.split_once(':') else {
                debug!("Skipping malformed glossary line {}: no separator", line_num + 1);
                continue;
            };
            let source = source.trim();
            let target = target.trim();
            if source.is_empty() || target.is_empty() {
                debug!("Skipping malformed glossary line {}: empty field", line_num + 1);
                continue;
            }
            entries.push(GlossaryEntry {
                source_term: source.to_string(),
                target_term: target.to_string(),
            });
        }
        Self::from_entries(entries)
    }

    /// Load and parse a term-list file. A missing or unreadable file
    /// is the one fatal condition of a validation run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read glossary file: {:?}", path))?;
        let glossary = Self::parse(&text);
        if glossary.entries.is_empty() {
            return Err(anyhow!("Glossary file {:?} contains no usable entries", path));
        }
        Ok(glossary)
    }

    /// Build the matcher over every entry plus its case-folded and
    /// capitalized key variants, all mapping to the same entry
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Self {
        let mut patterns: Vec<String> = Vec::new();
        let mut variant_entries: Vec<usize> = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            let mut variants = BTreeSet::new();
            variants.insert(entry.source_term.clone());
            variants.insert(entry.source_term.to_lowercase());
            variants.insert(capitalize(&entry.source_term));
            for variant in variants {
                patterns.push(variant);
                variant_entries.push(index);
            }
        }
        let matcher = TermMatcher::build(&patterns);
        Self {
            entries,
            variant_entries,
            matcher,
        }
    }

    /// The distinct entries, in term-list order
    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary carries no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry indices of every glossary term present in the text, in
    /// first-occurrence order, deduplicated
    pub fn terms_in(&self, text: &str) -> Vec<&GlossaryEntry> {
        let mut seen = BTreeSet::new();
        let mut found = Vec::new();
        for m in self.matcher.find_all(text) {
            let entry_index = self.variant_entries[m.pattern];
            if seen.insert(entry_index) {
                found.push(&self.entries[entry_index]);
            }
        }
        found
    }

    /// Check one aligned line pair. `source_residue` and
    /// `candidate_residue` are the pure-text residues; `line_num` is
    /// the 1-based source line.
    pub fn check_line(
        &self,
        line_num: usize,
        source_line: &str,
        candidate_line: &str,
        source_residue: &str,
        candidate_residue: &str,
        tokenizer: &dyn TargetTokenizer,
    ) -> Vec<Issue> {
        let present = self.terms_in(source_residue);
        if present.is_empty() {
            return vec![];
        }

        let candidate_morphemes = tokenizer.morphemes(candidate_residue);
        let candidate_lower = candidate_residue.to_lowercase();

        let mut issues = Vec::new();
        for entry in present {
            let target_applied = candidate_morphemes.contains(&entry.target_term)
                || candidate_residue.contains(&entry.target_term);
            if target_applied {
                continue;
            }

            let source_still_present =
                candidate_lower.contains(&entry.source_term.to_lowercase());
            let issue = if source_still_present {
                Issue::at_line(
                    Severity::Info,
                    IssueCategory::GlossaryCompliance,
                    line_num,
                    format!(
                        "Glossary not applied: `{}` is still present untranslated; the mandated \
                         rendering is `{}`.",
                        entry.source_term, entry.target_term
                    ),
                )
            } else {
                Issue::at_line(
                    Severity::Warning,
                    IssueCategory::GlossaryCompliance,
                    line_num,
                    format!(
                        "Glossary term mistranslated or missing: `{}` must be rendered as `{}`, \
                         but neither appears in the candidate line.",
                        entry.source_term, entry.target_term
                    ),
                )
            };
            issues.push(issue.with_snippets(source_line, candidate_line));
        }
        issues
    }
}

/// First letter uppercased, rest untouched
fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
