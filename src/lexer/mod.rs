/*!
 * Lexical layer: code-span extraction and line classification.
 *
 * Twee source is a hybrid document: prose interleaved with a small
 * embedded language. This module recognizes the embedded parts
 * lexically (no AST) and labels each line's content shape:
 * - `spans`: independent recognizers merged by span union
 * - `classify`: the closed `LineClass` variant set
 */

pub mod classify;
pub mod spans;

// Re-export main types
pub use classify::{LineClass, classify, is_content_bearing};
pub use spans::{CodeSpan, LinkMarkup, SpanKind, extract_spans, pure_text};
