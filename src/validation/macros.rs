/*!
 * Macro corruption checks.
 *
 * Macro invocations are code: translated text leaking into their
 * quoted arguments calls identifiers that do not exist and halts the
 * game. For each structurally-aligned line pair the macros are
 * compared positionally; a quoted literal carrying Hangul is Critical
 * unless the macro head legitimately takes natural-language string
 * arguments or the literal is a bare grammatical particle (the
 * EasyPost convention).
 */

use crate::issue::{Issue, IssueCategory, Severity};
use crate::lexer::spans::{STRING_LITERAL_REGEX, contains_korean, macro_head, macros};
use crate::validation::tokenizer::is_particle_token;

/// Macro heads whose string arguments are natural language by design
/// and may be translated
const STRING_ARG_MACROS: [&str; 7] = [
    "print", "link", "button", "say", "speech", "textbox", "tooltip",
];

/// Macro corruption checker
pub struct MacroChecker;

impl MacroChecker {
    /// Check one aligned line pair. Returns at most one issue per
    /// macro (first offending literal only).
    pub fn check_line(line_num: usize, source_line: &str, candidate_line: &str) -> Vec<Issue> {
        let source_macros = macros(source_line);
        let candidate_macros = macros(candidate_line);

        if source_macros.len() != candidate_macros.len() {
            return vec![
                Issue::at_line(
                    Severity::Critical,
                    IssueCategory::MacroCorruption,
                    line_num,
                    format!(
                        "Macro count differs from the source on this line (source: {}, \
                         candidate: {}). Macros must be preserved verbatim in place.",
                        source_macros.len(),
                        candidate_macros.len()
                    ),
                )
                .with_snippets(source_line, candidate_line),
            ];
        }

        let mut issues = Vec::new();
        for (source_macro, candidate_macro) in source_macros.iter().zip(candidate_macros.iter()) {
            let head = macro_head(candidate_macro);
            if STRING_ARG_MACROS.contains(&head.trim_end_matches('_')) {
                continue;
            }

            if let Some(literal) = first_corrupted_literal(candidate_macro) {
                issues.push(
                    Issue::at_line(
                        Severity::Critical,
                        IssueCategory::MacroCorruption,
                        line_num,
                        format!(
                            "Macro code contains translated text: literal `{}` inside `{}`. \
                             This can halt the game; use the EasyPost particle form instead.",
                            literal, candidate_macro
                        ),
                    )
                    .with_snippets(source_macro, candidate_macro),
                );
            }
        }
        issues
    }
}

/// First quoted literal in the macro that carries Hangul and is not a
/// bare particle token. When the argument expression concatenates
/// with `+`, scanning is restricted to the quoted operands so already
/// concatenated narrative text is not misread as code.
fn first_corrupted_literal(macro_text: &str) -> Option<String> {
    let inner = macro_text
        .trim_start_matches("<<")
        .trim_end_matches(">>");

    let scan_targets: Vec<&str> = if inner.contains('+') {
        inner.split('+').map(|operand| operand.trim()).collect()
    } else {
        vec![inner]
    };

    for target in scan_targets {
        for capture in STRING_LITERAL_REGEX.captures_iter(target) {
            let literal = capture.get(1).map(|m| m.as_str()).unwrap_or("");
            if contains_korean(literal) && !is_particle_token(literal) {
                return Some(literal.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkLine_translatedIdentifier_shouldBeCritical() {
        let issues = MacroChecker::check_line(
            12,
            r#"<<npc "Great Hawk">>"#,
            r#"<<npc "거대 매">>"#,
        );

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].category, IssueCategory::MacroCorruption);
        assert!(issues[0].description.contains("거대 매"));
        assert_eq!(issues[0].original.as_deref(), Some(r#"<<npc "Great Hawk">>"#));
        assert_eq!(issues[0].translated.as_deref(), Some(r#"<<npc "거대 매">>"#));
    }

    #[test]
    fn test_checkLine_macroPreservedProseTranslated_shouldBeQuiet() {
        let issues = MacroChecker::check_line(
            3,
            r#"Might catch a <<trCreature "struggle" "lurker">>s or two."#,
            r#"<<trCreature "struggle" "lurker">> 한두 마리를 잡을지도 모른다."#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_checkLine_particleArgument_shouldBeAllowed() {
        // EasyPost particle form: a bare 1-2 char particle is code, not prose
        let issues = MacroChecker::check_line(1, r#"<<He_ nun>>"#, r#"<<nnpc_HePost "Avery" "은">>"#);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_checkLine_nonParticleHangulLiteral_shouldBeFlagged() {
        let issues = MacroChecker::check_line(
            1,
            r#"<<trCreature "struggle" "lurker">>"#,
            r#"<<trCreature "struggle" "lurker" "한두 마리">>"#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("한두 마리"));
    }

    #[test]
    fn test_checkLine_stringArgMacro_shouldBeExempt() {
        let issues = MacroChecker::check_line(1, r#"<<say "Hello there">>"#, r#"<<say "안녕하세요">>"#);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_checkLine_concatenation_shouldScanOperandsOnly() {
        // The quoted narrative text between concatenated operands is
        // prose that was already lifted out of code position
        let issues = MacroChecker::check_line(
            1,
            r#"<<set $label to "prefix" + $name>>"#,
            r#"<<set $label to "prefix" + $name>>"#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_checkLine_concatenatedHangulOperand_shouldStillFlag() {
        let issues = MacroChecker::check_line(
            1,
            r#"<<set $label to "north" + $dir>>"#,
            r#"<<set $label to "북쪽" + $dir>>"#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("북쪽"));
    }

    #[test]
    fn test_checkLine_macroCountMismatch_shouldBeSingleCritical() {
        let issues = MacroChecker::check_line(5, "<<a>> and <<b>>", "<<a>> only");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("Macro count differs"));
    }

    #[test]
    fn test_checkLine_firstOffendingLiteralOnly() {
        let issues = MacroChecker::check_line(
            1,
            r#"<<npc "Hawk" "Owl">>"#,
            r#"<<npc "매새" "부엉이">>"#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("매새"));
        assert!(!issues[0].description.contains("부엉이"));
    }
}
