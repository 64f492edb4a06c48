/*!
 * Structural alignment of source and candidate documents.
 *
 * Equal line counts are accepted as positional correspondence and the
 * pair is declared structurally sound. Otherwise a Myers LCS line
 * diff (no junk-line skipping, since legitimate blank lines must not
 * be ignored) locates every contiguous run that changes the line
 * count; each run becomes one Critical issue carrying nearby context.
 * Balanced replacements are not structural damage; content differences
 * are expected and checked elsewhere. A replacement run that rewrites
 * N source lines as M candidate lines is damage and is reported.
 */

use log::debug;
use std::collections::HashMap;

use crate::document::TweeDocument;
use crate::issue::{Issue, IssueCategory, Severity};

/// Outcome of structural alignment
#[derive(Debug, Clone)]
pub struct AlignmentOutcome {
    /// Whether per-line positional checks are safe to run
    pub structurally_sound: bool,
    /// One Critical issue per contiguous line-count-changing run
    pub issues: Vec<Issue>,
}

/// Diff opcode tags, difflib-style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpTag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// A contiguous diff region: source range [i1, i2), candidate [j1, j2)
#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: OpTag,
    i1: usize,
    i2: usize,
    j1: usize,
    j2: usize,
}

/// Structural aligner with a configurable context window
pub struct StructuralAligner {
    context_lines: usize,
}

impl StructuralAligner {
    /// Create an aligner showing `context_lines` of unchanged lines
    /// around each reported run
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }

    /// Align the two documents. Equal lengths short-circuit to sound.
    pub fn align(&self, source: &TweeDocument, candidate: &TweeDocument) -> AlignmentOutcome {
        if source.line_count() == candidate.line_count() {
            return AlignmentOutcome {
                structurally_sound: true,
                issues: vec![],
            };
        }

        debug!(
            "Line counts diverge (source: {}, candidate: {}); running line diff",
            source.line_count(),
            candidate.line_count()
        );

        let source_lines = source.lines();
        let candidate_lines = candidate.lines();
        let (a, b) = intern_lines(source_lines, candidate_lines);

        let mut issues = Vec::new();
        for op in diff_opcodes(&a, &b) {
            let description = match op.tag {
                OpTag::Delete => format!(
                    "{} line(s) present in the source were dropped near source line {}. \
                     The candidate must match the source structure line for line.",
                    op.i2 - op.i1,
                    op.i1 + 1
                ),
                OpTag::Insert => format!(
                    "{} extra line(s) were added near source line {}. \
                     The candidate must match the source structure line for line.",
                    op.j2 - op.j1,
                    op.i1 + 1
                ),
                // An unbalanced replacement changes the line count and
                // is just as fatal as a bare insert or delete
                OpTag::Replace if op.i2 - op.i1 != op.j2 - op.j1 => format!(
                    "{} source line(s) were rewritten as {} line(s) near source line {}. \
                     The candidate must match the source structure line for line.",
                    op.i2 - op.i1,
                    op.j2 - op.j1,
                    op.i1 + 1
                ),
                OpTag::Equal | OpTag::Replace => continue,
            };

            let diff_text = self.render_excerpt(source_lines, candidate_lines, op);
            issues.push(
                Issue::at_line(
                    Severity::Critical,
                    IssueCategory::StructuralMismatch,
                    op.i1 + 1,
                    description,
                )
                .with_diff(diff_text),
            );
        }

        AlignmentOutcome {
            structurally_sound: false,
            issues,
        }
    }

    /// Unified-diff-style excerpt: fixed context window, then the
    /// literal deleted and/or inserted lines
    fn render_excerpt(&self, source: &[String], candidate: &[String], op: Opcode) -> String {
        let mut lines = Vec::new();
        let start = op.i1.saturating_sub(self.context_lines);
        for line in &source[start..op.i1] {
            lines.push(format!("  {}", line));
        }
        for line in &source[op.i1..op.i2] {
            lines.push(format!("- {}", line));
        }
        for line in &candidate[op.j1..op.j2] {
            lines.push(format!("+ {}", line));
        }
        let end = (op.i2 + self.context_lines).min(source.len());
        for line in &source[op.i2..end] {
            lines.push(format!("  {}", line));
        }
        lines.join("\n")
    }
}

/// Map each distinct line to a small integer so the diff compares ids
fn intern_lines(source: &[String], candidate: &[String]) -> (Vec<u32>, Vec<u32>) {
    let mut ids: HashMap<String, u32> = HashMap::new();
    let mut id_of = |line: &String| -> u32 {
        let next = ids.len() as u32;
        *ids.entry(line.clone()).or_insert(next)
    };
    let a: Vec<u32> = source.iter().map(&mut id_of).collect();
    let b: Vec<u32> = candidate.iter().map(&mut id_of).collect();
    (a, b)
}

/// Myers O(ND) shortest edit script, folded into difflib-style
/// opcodes over contiguous regions
fn diff_opcodes(a: &[u32], b: &[u32]) -> Vec<Opcode> {
    let steps = myers_steps(a, b);

    let mut ops: Vec<Opcode> = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let mut idx = 0usize;
    while idx < steps.len() {
        match steps[idx] {
            Step::Equal => {
                let (i1, j1) = (i, j);
                while idx < steps.len() && steps[idx] == Step::Equal {
                    i += 1;
                    j += 1;
                    idx += 1;
                }
                ops.push(Opcode { tag: OpTag::Equal, i1, i2: i, j1, j2: j });
            }
            Step::Delete | Step::Insert => {
                let (i1, j1) = (i, j);
                while idx < steps.len() && steps[idx] != Step::Equal {
                    match steps[idx] {
                        Step::Delete => i += 1,
                        Step::Insert => j += 1,
                        Step::Equal => unreachable!(),
                    }
                    idx += 1;
                }
                let tag = if i > i1 && j > j1 {
                    OpTag::Replace
                } else if i > i1 {
                    OpTag::Delete
                } else {
                    OpTag::Insert
                };
                ops.push(Opcode { tag, i1, i2: i, j1, j2: j });
            }
        }
    }
    ops
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Equal,
    Delete,
    Insert,
}

/// Forward-order edit steps between `a` and `b`
fn myers_steps(a: &[u32], b: &[u32]) -> Vec<Step> {
    let n = a.len();
    let m = b.len();
    if n == 0 {
        return vec![Step::Insert; m];
    }
    if m == 0 {
        return vec![Step::Delete; n];
    }

    let max = n + m;
    let offset = max as isize;
    let mut v = vec![0usize; 2 * max + 1];
    let mut trace: Vec<Vec<usize>> = Vec::new();

    'outer: for d in 0..=(max as isize) {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                break 'outer;
            }
            k += 2;
        }
    }

    // Backtrack from (n, m) through the stored V states
    let mut rev: Vec<Step> = Vec::new();
    let mut x = n as isize;
    let mut y = m as isize;
    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let prev_k = if k == -d || (k != d && v[(k - 1 + offset) as usize] < v[(k + 1 + offset) as usize]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[(prev_k + offset) as usize] as isize;
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            rev.push(Step::Equal);
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == prev_x {
                rev.push(Step::Insert);
            } else {
                rev.push(Step::Delete);
            }
            x = prev_x;
            y = prev_y;
        }
    }
    rev.reverse();
    rev
}
