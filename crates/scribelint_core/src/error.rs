//! Linter error types.

use scribelint_ast::Span;
use thiserror::Error;

/// Errors that can occur while linting.
///
/// `EngineUnavailable`, `AiUnavailable`, `MalformedRule` and `StaleResult`
/// are contained where they are detected; they are logged and the pass
/// continues with whatever the other sources produced.
#[derive(Debug, Error)]
pub enum LintError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] scribelint_parser::ParseError),

    /// Plugin error.
    #[error("Plugin error: {0}")]
    Plugin(#[from] scribelint_plugin::PluginError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] scribelint_cache::CacheError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The grammar engine failed; the pass degrades to pattern rules only.
    #[error("Grammar engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The AI reviewer could not answer.
    #[error("AI reviewer unavailable: {0}")]
    AiUnavailable(String),

    /// A rule failed to compile or panicked.
    #[error("Malformed rule '{0}'")]
    MalformedRule(String),

    /// Results arrived for a snapshot that is no longer current.
    #[error("Result is stale: the text changed since it was computed")]
    StaleResult,
}

impl LintError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}

/// Reasons a single fix could not be applied to the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    /// The span is empty, inverted or outside the flattened text.
    #[error("Span {start}..{end} is not valid for text of length {len}", start = .span.start, end = .span.end)]
    InvalidSpan { span: Span, len: usize },

    /// The span crosses an inserted boundary character.
    #[error("Span {start}..{end} crosses a block boundary", start = .span.start, end = .span.end)]
    StraddlesBoundary { span: Span },

    /// The fix overlaps another fix of the same batch that was kept.
    #[error("Span {start}..{end} overlaps another fix", start = .span.start, end = .span.end)]
    Overlapping { span: Span },

    /// No text node backs the span.
    #[error("No text node at offset {0}")]
    NoSegment(u32),

    /// The text the fix was computed for could not be found any more.
    #[error("Could not locate {0:?} in the current text")]
    NotFound(String),

    /// The tree refused the edit (e.g. not on a char boundary).
    #[error("Edit rejected by the document tree")]
    EditRejected,
}
