/*!
 * Line classification for Twee documents.
 *
 * Classification is a pure function over one line returning a closed
 * variant; downstream checks match exhaustively over the set. Each
 * line is classified independently; a macro opened on one line and
 * closed on a later one is not modeled.
 */

use super::spans::{extract_spans, has_text, pure_text};

/// Content shape of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    /// Nothing but whitespace
    Blank,
    /// `:: Passage Name`, an internal address, never translated
    PassageHeader,
    /// `# Heading`, markdown-style, never translated
    MarkdownHeader,
    /// `/* ... */`, `/% ... %/` or `<!-- ... -->` opener
    Comment,
    /// Code spans only, no prose residue
    PureCode,
    /// Prose only, no code spans
    PureText,
    /// Code spans interleaved with prose
    MixedContent,
    /// Neither code nor prose (stray punctuation, broken markup)
    UnknownCode,
}

const COMMENT_OPENERS: [&str; 3] = ["/*", "/%", "<!--"];

/// Classify a single line. Precedence is evaluated top-down: Blank,
/// PassageHeader, MarkdownHeader, Comment, then the (has-code,
/// has-text) quadrant.
pub fn classify(line: &str) -> LineClass {
    if line.trim().is_empty() {
        return LineClass::Blank;
    }
    if line.starts_with(":: ") {
        return LineClass::PassageHeader;
    }
    if is_markdown_header(line) {
        return LineClass::MarkdownHeader;
    }
    if COMMENT_OPENERS.iter().any(|opener| line.trim_start().starts_with(opener)) {
        return LineClass::Comment;
    }

    let has_code = !extract_spans(line).is_empty();
    let residue_has_text = has_text(&pure_text(line));
    match (has_code, residue_has_text) {
        (true, false) => LineClass::PureCode,
        (false, true) => LineClass::PureText,
        (true, true) => LineClass::MixedContent,
        (false, false) => LineClass::UnknownCode,
    }
}

fn is_markdown_header(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    hashes > 0 && line[hashes..].starts_with(' ')
}

/// Whether a class carries translatable prose worth content checks
pub fn is_content_bearing(class: LineClass) -> bool {
    matches!(class, LineClass::PureText | LineClass::MixedContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blankLine_shouldBeBlank() {
        assert_eq!(classify(""), LineClass::Blank);
        assert_eq!(classify("   \t"), LineClass::Blank);
    }

    #[test]
    fn test_classify_passageHeader_shouldWinOverCode() {
        assert_eq!(classify(":: Bird Hunt Intro"), LineClass::PassageHeader);
        assert_eq!(classify(":: Widgets [widget]"), LineClass::PassageHeader);
    }

    #[test]
    fn test_classify_markdownHeader_shouldRequireSpace() {
        assert_eq!(classify("# Notes"), LineClass::MarkdownHeader);
        assert_eq!(classify("## More notes"), LineClass::MarkdownHeader);
        assert_eq!(classify("#nospace"), LineClass::PureText);
    }

    #[test]
    fn test_classify_comment_shouldMatchOpeners() {
        assert_eq!(classify("/* twee comment */"), LineClass::Comment);
        assert_eq!(classify("<!-- html comment -->"), LineClass::Comment);
        assert_eq!(classify("/% sugarcube comment %/"), LineClass::Comment);
    }

    #[test]
    fn test_classify_pureCode_shouldHaveNoResidue() {
        assert_eq!(classify("<<set $bird.hunts.direction to \"north\">>"), LineClass::PureCode);
    }

    #[test]
    fn test_classify_pureText_shouldHaveNoSpans() {
        assert_eq!(classify("The hawk circles overhead."), LineClass::PureText);
    }

    #[test]
    fn test_classify_mixedContent_shouldHaveBoth() {
        assert_eq!(
            classify("Might catch a <<trCreature \"struggle\" \"lurker\">>s or two."),
            LineClass::MixedContent
        );
    }

    #[test]
    fn test_classify_strayPunctuation_shouldBeUnknownCode() {
        assert_eq!(classify("}}"), LineClass::UnknownCode);
    }

    #[test]
    fn test_isContentBearing_shouldCoverProseClasses() {
        assert!(is_content_bearing(LineClass::PureText));
        assert!(is_content_bearing(LineClass::MixedContent));
        assert!(!is_content_bearing(LineClass::PureCode));
        assert!(!is_content_bearing(LineClass::PassageHeader));
    }
}
