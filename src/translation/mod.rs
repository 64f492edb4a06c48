/*!
 * External translation collaborator.
 *
 * Produces candidate documents by sending source text to a rewriting
 * provider: prompt construction, passage-boundary chunking and
 * bounded-concurrency request driving live here. The validator never
 * trusts this output; every candidate goes through a full validation
 * run.
 */

pub mod chunking;
pub mod prompt;
pub mod service;

pub use chunking::{chunk_for_translation, split_passages};
pub use prompt::{build_system_prompt, build_user_prompt, file_context_note};
pub use service::{TranslationOutcome, TranslationService};
