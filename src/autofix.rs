/*!
 * Conservative auto-fixer for mechanically corrupted macro syntax.
 *
 * A short ordered list of pattern rewrites applied per line to the
 * candidate document only. Each rule targets one corruption shape the
 * rewriting step is known to produce, and each rule is idempotent:
 * re-applying it to its own output changes nothing. A rule that does
 * not match is a no-op, never an error. The fixed document is always
 * re-validated in full afterwards, never trusted outright.
 */

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::document::TweeDocument;

/// Malformed closing tag missing its opening bracket pair:
/// `</if>>` normalized to `<</if>>`
static BARE_CLOSING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^<]|^)</(\w+)>>").expect("Invalid bare closing regex")
});

/// Particle suffix stuck inside a closing tag:
/// `<</if은>>` becomes `<</if>>은`
static CLOSING_PARTICLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<</(\w+)([가-힣]{1,2})>>").expect("Invalid closing particle regex")
});

/// Particle suffix stuck after a macro's quoted positional arguments:
/// `<<npc "Avery"은>>` becomes the EasyPost form `<<npc_ 은 "Avery">>`
static ARG_PARTICLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<<(\w+)\s+((?:"[^"]*"\s*)+)([가-힣]{1,2})>>"#)
        .expect("Invalid argument particle regex")
});

/// One applied rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixRecord {
    /// 1-based line number in the candidate document
    pub line_num: usize,
    /// Line text before the rewrite
    pub before: String,
    /// Line text after the rewrite
    pub after: String,
}

/// Audit trail of one fixer pass
#[derive(Debug, Default)]
pub struct FixReport {
    /// One record per changed line, in document order
    pub records: Vec<FixRecord>,
}

impl FixReport {
    /// Number of lines changed
    pub fn changed_lines(&self) -> usize {
        self.records.len()
    }

    /// Whether the pass changed nothing
    pub fn is_clean(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pattern-based macro syntax fixer
pub struct AutoFixer;

impl AutoFixer {
    /// Apply every rule to every line of the candidate document.
    /// Returns the rewritten document and the itemized fix report.
    pub fn fix(candidate: &TweeDocument) -> (TweeDocument, FixReport) {
        let mut report = FixReport::default();
        let mut fixed_lines = Vec::with_capacity(candidate.line_count());

        for (index, line) in candidate.lines().iter().enumerate() {
            let fixed = fix_line(line);
            if &fixed != line {
                debug!("Fixed line {}: {:?} -> {:?}", index + 1, line, fixed);
                report.records.push(FixRecord {
                    line_num: index + 1,
                    before: line.clone(),
                    after: fixed.clone(),
                });
            }
            fixed_lines.push(fixed);
        }

        if !report.is_clean() {
            info!("Auto-fixer rewrote {} line(s)", report.changed_lines());
        }
        (TweeDocument::from_lines(fixed_lines), report)
    }
}

/// Apply the rule chain to one line. Normalization of bare closing
/// tags runs first so the particle rules see well-formed brackets.
fn fix_line(line: &str) -> String {
    let line = BARE_CLOSING_REGEX.replace_all(line, "${1}<</${2}>>");
    let line = CLOSING_PARTICLE_REGEX.replace_all(&line, "<</${1}>>${2}");
    let line = ARG_PARTICLE_REGEX.replace_all(&line, |caps: &Captures| {
        let head = &caps[1];
        // Already in EasyPost form; leave it alone
        if head.ends_with('_') {
            return caps[0].to_string();
        }
        format!("<<{}_ {} {}>>", head, &caps[3], caps[2].trim_end())
    });
    line.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> TweeDocument {
        TweeDocument::from_lines(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_fixLine_bareClosingTag_shouldGainOpeningBrackets() {
        assert_eq!(fix_line("text </if>> more"), "text <</if>> more");
        assert_eq!(fix_line("</if>> at line start"), "<</if>> at line start");
    }

    #[test]
    fn test_fixLine_wellFormedClosingTag_shouldBeUntouched() {
        assert_eq!(fix_line("text <</if>> more"), "text <</if>> more");
    }

    #[test]
    fn test_fixLine_particleInsideClosingTag_shouldMoveOutside() {
        assert_eq!(fix_line("<</if은>> 끝"), "<</if>>은 끝");
    }

    #[test]
    fn test_fixLine_bareClosingWithParticle_shouldCascadeInOnePass() {
        // Normalization must run before particle relocation
        assert_eq!(fix_line("</if은>>"), "<</if>>은");
    }

    #[test]
    fn test_fixLine_particleAfterArguments_shouldRelocateToHead() {
        assert_eq!(fix_line(r#"<<npc "Avery"은>>"#), r#"<<npc_ 은 "Avery">>"#);
    }

    #[test]
    fn test_fixLine_multipleQuotedArguments_shouldKeepThemAll() {
        assert_eq!(
            fix_line(r#"<<npc "Avery" "Bell"가>>"#),
            r#"<<npc_ 가 "Avery" "Bell">>"#
        );
    }

    #[test]
    fn test_fixLine_easyPostHead_shouldBeLeftAlone() {
        let line = r#"<<npc_ "Avery"은>>"#;
        assert_eq!(fix_line(line), line);
    }

    #[test]
    fn test_fixLine_cleanLine_shouldBeNoOp() {
        let line = r#"평범한 <<set $x to 1>> 줄과 [[링크|Dest]] 하나."#;
        assert_eq!(fix_line(line), line);
    }

    #[test]
    fn test_fix_shouldRecordEveryChangedLine() {
        let candidate = doc(&[
            "정상 줄입니다.",
            "<</if은>> 끝",
            "또 정상 줄.",
            r#"<<npc "Avery"은>>"#,
        ]);

        let (fixed, report) = AutoFixer::fix(&candidate);
        assert_eq!(report.changed_lines(), 2);
        assert_eq!(report.records[0].line_num, 2);
        assert_eq!(report.records[0].before, "<</if은>> 끝");
        assert_eq!(report.records[0].after, "<</if>>은 끝");
        assert_eq!(report.records[1].line_num, 4);
        assert_eq!(fixed.lines()[0], "정상 줄입니다.");
    }

    #[test]
    fn test_fix_secondPass_shouldBeIdempotent() {
        let candidate = doc(&[
            "</if은>>",
            r#"<<npc "Avery"은>>"#,
            "<</while도>> 반복",
        ]);

        let (once, first) = AutoFixer::fix(&candidate);
        assert_eq!(first.changed_lines(), 3);

        let (twice, second) = AutoFixer::fix(&once);
        assert!(second.is_clean());
        assert_eq!(once.lines(), twice.lines());
    }

    #[test]
    fn test_fix_shouldNeverTouchTheInputDocument() {
        let candidate = doc(&["</if>>"]);
        let (_, report) = AutoFixer::fix(&candidate);
        assert_eq!(report.changed_lines(), 1);
        assert_eq!(candidate.lines()[0], "</if>>");
    }
}
