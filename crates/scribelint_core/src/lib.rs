//! # scribelint_core
//!
//! Lint aggregation and text/structure synchronization for scribelint.
//!
//! This crate provides:
//! - The `Linter` that merges engine, pattern-rule and clause lints
//! - Flattening a document tree to plain text and mapping spans back
//! - Applying fixes to the tree and writing them back to the source
//! - A debounced two-phase pipeline with optional AI review
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribelint_core::{Linter, LinterConfig};
//!
//! let config = LinterConfig::from_file(".scribelint.jsonc")?;
//! let linter = Linter::new(config)?;
//!
//! let (results, failures) = linter.lint_files(&paths);
//! for result in results {
//!     println!("{}: {} issues", result.path.display(), result.lints.len());
//! }
//! ```

mod aggregator;
pub mod applicator;
mod config;
mod engines;
mod error;
mod fixer;
mod linter;
pub mod mapper;
mod misspellings;
pub mod pipeline;
mod postprocess;
mod result;
pub mod session;

pub use aggregator::{LintAggregator, sort_lints};
pub use applicator::{BatchReport, FixFailure, apply_batch, apply_one};
pub use config::{AiConfig, CategoryToggles, LinterConfig, MIN_DEBOUNCE_MS};
pub use engines::DictionaryEngine;
pub use error::{FixError, LintError};
pub use fixer::{
    FixOutcome, FixerResult, apply_edits_to_content, apply_fixes_to_file, fix_source, write_back,
};
pub use linter::{LintFilesResult, Linter};
pub use mapper::{FlatText, Segment, flatten};
pub use misspellings::Dictionary;
pub use pipeline::{LintPipeline, PipelineEvent};
pub use postprocess::{collapse_doubled_consonant, postprocess, postprocess_lint};
pub use result::{LintResult, SourceLint};
pub use session::{SessionId, SessionState, SessionStore};

pub use scribelint_parser::parser_for_extension;
pub use scribelint_plugin::{
    Category, Fix, Lint, LintKind, LintSource, Suggestion, SuggestionKind,
};
