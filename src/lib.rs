/*!
 * # TweeGuard - Localization validation for Twee game scripts
 *
 * A Rust library for validating machine translations of Twee/Twine
 * narrative scripts without breaking the game they drive.
 *
 * ## Features
 *
 * - Lexical recognition of embedded code: macros, links, variables, tags
 * - Structural alignment between source and candidate documents
 * - Identifier integrity checks: passage headers, link destinations, variables
 * - Macro corruption and content heuristic checks with calibrated severities
 * - Glossary compliance via multi-pattern matching and morpheme tokenization
 * - A conservative auto-fixer for mechanical macro corruption
 * - An optional translation collaborator with passage-boundary chunking
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `lexer`: Code-span extraction and line classification
 * - `document`: The line-oriented Twee document model
 * - `validation`: The checker pipeline:
 *   - `validation::alignment`: Structural line alignment
 *   - `validation::identifiers`: Address, link and variable integrity
 *   - `validation::macros`: Macro literal corruption
 *   - `validation::content`: Content quality heuristics
 *   - `validation::glossary`: Glossary compliance
 *   - `validation::service`: The orchestrating validator
 * - `autofix`: Pattern-based repair of mechanical macro corruption
 * - `report`: Markdown rendering of validation and fix reports
 * - `translation`: Prompting, chunking and concurrent request driving
 * - `providers`: Client implementations for rewriting backends
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod autofix;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod issue;
pub mod lexer;
pub mod providers;
pub mod report;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use autofix::{AutoFixer, FixRecord, FixReport};
pub use document::TweeDocument;
pub use errors::{AppError, ProviderError, TranslationError};
pub use issue::{Issue, IssueCategory, Severity};
pub use translation::TranslationService;
pub use validation::{Glossary, ValidationReport, Validator};
