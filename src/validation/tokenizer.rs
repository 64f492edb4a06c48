/*!
 * Target-language tokenization.
 *
 * Glossary compliance cannot rely on substring containment alone:
 * Korean grammatical particles attach directly to the translated
 * term (매가, 매를, 매는...), so the candidate text must be split
 * into morphemes before the mandated value can be matched exactly.
 * The capability is modeled as a trait so a standards-based
 * morphological analyzer can be substituted.
 */

use std::collections::BTreeSet;

/// Grammatical-particle tokens that may legitimately appear as short
/// Hangul literals (EasyPost macro arguments) and that are stripped
/// from word endings during tokenization
pub const KOREAN_PARTICLES: [&str; 26] = [
    "은", "는", "이", "가", "을", "를", "과", "와", "의", "에", "도", "만", "로", "나", "랑",
    "야", "아", "께", "으로", "에서", "에게", "부터", "까지", "처럼", "보다", "이랑",
];

/// Produces the set of morpheme strings present in a text span
pub trait TargetTokenizer {
    /// Tokenize a text span into morphemes
    fn morphemes(&self, text: &str) -> BTreeSet<String>;
}

/// Lightweight Korean tokenizer: splits on whitespace and punctuation,
/// then peels known particle suffixes off each word so the bare stem
/// is available as a morpheme alongside the inflected form.
#[derive(Debug, Default, Clone, Copy)]
pub struct KoreanTokenizer;

impl KoreanTokenizer {
    /// Create a tokenizer
    pub fn new() -> Self {
        Self
    }

    fn words(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\''))
            .filter(|w| !w.is_empty())
    }
}

impl TargetTokenizer for KoreanTokenizer {
    fn morphemes(&self, text: &str) -> BTreeSet<String> {
        let mut morphemes = BTreeSet::new();
        for word in Self::words(text) {
            morphemes.insert(word.to_string());

            // Peel particles repeatedly: 매에게도 -> 매에게 -> 매
            let mut stem = word;
            loop {
                let mut peeled = None;
                for particle in KOREAN_PARTICLES {
                    if stem.len() > particle.len() && stem.ends_with(particle) {
                        peeled = Some(&stem[..stem.len() - particle.len()]);
                        break;
                    }
                }
                match peeled {
                    Some(next) => {
                        morphemes.insert(next.to_string());
                        stem = next;
                    }
                    None => break,
                }
            }
        }
        morphemes
    }
}

/// Whether a literal is a bare 1–2 character particle token
pub fn is_particle_token(text: &str) -> bool {
    KOREAN_PARTICLES.contains(&text)
}
