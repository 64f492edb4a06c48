/*!
 * Lexical recognition of non-translatable spans.
 *
 * A line of Twee source interleaves prose with a small embedded
 * language. This module recognizes the embedded parts lexically (no
 * grammar is parsed) as a small ordered set of independent
 * recognizers merged by leftmost-longest span union. The residue left
 * after removing all spans is the "pure text" that translation is
 * allowed to touch.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Macro invocation: `<<head arg ...>>`, non-greedy
pub static MACRO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<.*?>>").expect("Invalid macro regex")
});

/// Link markup: `[[display|destination]]` or `[[destination]]`
pub static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[.*?\]\]").expect("Invalid link regex")
});

/// Variable reference: `$` sigil followed by a dotted identifier path
pub static VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[a-zA-Z0-9_.]+").expect("Invalid variable regex")
});

/// Inline markup tag: `<span ...>`, `</i>` and friends
pub static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[a-zA-Z][^<>]*>").expect("Invalid tag regex")
});

/// Hangul syllables and jamo
pub static KOREAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ㄱ-ㅎ가-힣]").expect("Invalid korean regex")
});

/// Quoted string literal inside a macro invocation
pub static STRING_LITERAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']([^"']*)["']"#).expect("Invalid string literal regex")
});

/// Kind of recognized non-translatable span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// `<<...>>` macro invocation
    Macro,
    /// `[[...]]` interactive link
    Link,
    /// `$path.to.value` variable reference
    Variable,
    /// `<...>` inline markup tag
    MarkupTag,
}

/// A recognized code span within a single line, as byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpan {
    /// What recognizer produced the span
    pub kind: SpanKind,
    /// Byte offset of the span start
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
}

impl CodeSpan {
    /// Slice the span text out of its line
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }
}

/// Run every recognizer over the line and merge the results into a
/// disjoint, ordered span set. Overlaps are resolved leftmost-longest:
/// a span starting inside an earlier span is dropped, so a `<tag>`
/// match inside `<<macro>>` never survives.
pub fn extract_spans(line: &str) -> Vec<CodeSpan> {
    let recognizers: [(&Regex, SpanKind); 4] = [
        (&MACRO_REGEX, SpanKind::Macro),
        (&LINK_REGEX, SpanKind::Link),
        (&VARIABLE_REGEX, SpanKind::Variable),
        (&TAG_REGEX, SpanKind::MarkupTag),
    ];

    let mut spans: Vec<CodeSpan> = Vec::new();
    for (regex, kind) in recognizers {
        for m in regex.find_iter(line) {
            spans.push(CodeSpan {
                kind,
                start: m.start(),
                end: m.end(),
            });
        }
    }

    // Leftmost first; on ties the longest span wins
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut merged: Vec<CodeSpan> = Vec::new();
    let mut cursor = 0usize;
    for span in spans {
        if span.start >= cursor {
            cursor = span.end;
            merged.push(span);
        }
    }
    merged
}

/// The prose residue of a line: everything outside recognized spans
pub fn pure_text(line: &str) -> String {
    let spans = extract_spans(line);
    let mut residue = String::with_capacity(line.len());
    let mut cursor = 0usize;
    for span in &spans {
        residue.push_str(&line[cursor..span.start]);
        cursor = span.end;
    }
    residue.push_str(&line[cursor..]);
    residue
}

/// Whether the residue carries translatable content. Pure punctuation
/// or whitespace does not count as text.
pub fn has_text(residue: &str) -> bool {
    residue.chars().any(|c| c.is_alphanumeric())
}

/// All macro invocations on a line, in order
pub fn macros(line: &str) -> Vec<&str> {
    MACRO_REGEX.find_iter(line).map(|m| m.as_str()).collect()
}

/// All variable references on a line, in order
pub fn variables(line: &str) -> Vec<&str> {
    VARIABLE_REGEX.find_iter(line).map(|m| m.as_str()).collect()
}

/// A parsed `[[...]]` construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMarkup<'a> {
    /// User-visible display segment
    pub display: &'a str,
    /// Destination passage identifier
    pub destination: &'a str,
}

/// Parse every link on a line into display/destination segments.
/// `[[dest]]` uses the whole bracket content as both.
pub fn links(line: &str) -> Vec<LinkMarkup<'_>> {
    LINK_REGEX
        .find_iter(line)
        .map(|m| {
            let inner = &line[m.start() + 2..m.end() - 2];
            match inner.split_once('|') {
                Some((display, destination)) => LinkMarkup {
                    display,
                    destination,
                },
                None => LinkMarkup {
                    display: inner,
                    destination: inner,
                },
            }
        })
        .collect()
}

/// Head identifier of a macro invocation text (`<<head ...>>`)
pub fn macro_head(macro_text: &str) -> &str {
    let inner = macro_text
        .trim_start_matches("<<")
        .trim_end_matches(">>")
        .trim();
    inner
        .split(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
}

/// Whether any Hangul is present
pub fn contains_korean(text: &str) -> bool {
    KOREAN_REGEX.is_match(text)
}
