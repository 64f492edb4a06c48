/*!
 * Validation pipeline for translated Twee documents.
 *
 * The pipeline compares a source document against its translation
 * candidate: structural alignment first, then identifier integrity,
 * macro corruption, content heuristics and glossary compliance. Every
 * checker appends to one issue list; nothing short-circuits.
 */

pub mod alignment;
pub mod content;
pub mod glossary;
pub mod identifiers;
pub mod macros;
pub mod matcher;
pub mod service;
pub mod tokenizer;

pub use alignment::{AlignmentOutcome, StructuralAligner};
pub use content::ContentChecker;
pub use glossary::{Glossary, GlossaryEntry};
pub use identifiers::IdentifierChecker;
pub use macros::MacroChecker;
pub use matcher::{TermMatch, TermMatcher};
pub use service::{ValidationReport, Validator};
pub use tokenizer::{KoreanTokenizer, TargetTokenizer};
