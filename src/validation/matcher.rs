/*!
 * Multi-pattern term matcher.
 *
 * A trie-based automaton in the Aho-Corasick style: construction cost
 * is proportional to total pattern length, scanning cost to text
 * length plus match count. This keeps glossary compliance linear in
 * document size regardless of glossary size, instead of one substring
 * search per term.
 */

use std::collections::{HashMap, VecDeque};

/// A single hit in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch {
    /// Index of the matched pattern, in insertion order
    pub pattern: usize,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    fail: usize,
    /// Patterns ending at this node (own plus inherited via fail links)
    output: Vec<usize>,
}

/// Trie automaton over a fixed pattern set, built once per run
#[derive(Debug)]
pub struct TermMatcher {
    nodes: Vec<Node>,
    pattern_lengths: Vec<usize>,
}

impl TermMatcher {
    /// Build the automaton from a pattern list. Empty patterns are
    /// ignored. Pattern indices follow insertion order.
    pub fn build<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut nodes: Vec<Node> = vec![Node::default()];
        let mut pattern_lengths = Vec::with_capacity(patterns.len());

        for (index, pattern) in patterns.iter().enumerate() {
            let pattern = pattern.as_ref();
            pattern_lengths.push(pattern.len());
            if pattern.is_empty() {
                continue;
            }
            let mut current = 0usize;
            for c in pattern.chars() {
                let next = match nodes[current].children.get(&c) {
                    Some(&next) => next,
                    None => {
                        nodes.push(Node::default());
                        let next = nodes.len() - 1;
                        nodes[current].children.insert(c, next);
                        next
                    }
                };
                current = next;
            }
            nodes[current].output.push(index);
        }

        // BFS fail links; outputs are merged down so every node knows
        // all patterns ending at it
        let mut queue = VecDeque::new();
        let root_children: Vec<usize> = nodes[0].children.values().copied().collect();
        for child in root_children {
            nodes[child].fail = 0;
            queue.push_back(child);
        }
        while let Some(state) = queue.pop_front() {
            let transitions: Vec<(char, usize)> =
                nodes[state].children.iter().map(|(&c, &n)| (c, n)).collect();
            for (c, next) in transitions {
                let mut fail = nodes[state].fail;
                let fail_of_next = loop {
                    if let Some(&target) = nodes[fail].children.get(&c) {
                        break target;
                    }
                    if fail == 0 {
                        break 0;
                    }
                    fail = nodes[fail].fail;
                };
                nodes[next].fail = fail_of_next;
                let inherited = nodes[fail_of_next].output.clone();
                nodes[next].output.extend(inherited);
                queue.push_back(next);
            }
        }

        Self {
            nodes,
            pattern_lengths,
        }
    }

    /// Scan the text, reporting every occurrence of every pattern
    /// (overlaps included)
    pub fn find_all(&self, text: &str) -> Vec<TermMatch> {
        let mut matches = Vec::new();
        let mut state = 0usize;
        for (offset, c) in text.char_indices() {
            loop {
                if let Some(&next) = self.nodes[state].children.get(&c) {
                    state = next;
                    break;
                }
                if state == 0 {
                    break;
                }
                state = self.nodes[state].fail;
            }
            let end = offset + c.len_utf8();
            for &pattern in &self.nodes[state].output {
                matches.push(TermMatch {
                    pattern,
                    start: end - self.pattern_lengths[pattern],
                    end,
                });
            }
        }
        matches
    }

    /// Whether any pattern occurs in the text
    pub fn is_match(&self, text: &str) -> bool {
        let mut state = 0usize;
        for c in text.chars() {
            loop {
                if let Some(&next) = self.nodes[state].children.get(&c) {
                    state = next;
                    break;
                }
                if state == 0 {
                    break;
                }
                state = self.nodes[state].fail;
            }
            if !self.nodes[state].output.is_empty() {
                return true;
            }
        }
        false
    }
}
