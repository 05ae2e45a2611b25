//! Lint result types.

use std::path::PathBuf;

use scribelint_ast::{Document, LineIndex, Location};
use scribelint_plugin::Lint;
use serde::Serialize;

use crate::mapper::FlatText;

/// Lints of one parsed source, with what is needed to locate or fix them.
#[derive(Debug, Clone)]
pub struct SourceLint {
    /// The parsed document.
    pub document: Document,
    /// The flattened text the lint spans refer to.
    pub flat: FlatText,
    /// Merged lints, sorted by start offset.
    pub lints: Vec<Lint>,
    /// Whether the lints were loaded from cache.
    pub from_cache: bool,
}

impl SourceLint {
    /// Resolves each lint to a line/column location in `source`.
    ///
    /// Lints inside text that has no source position resolve to `None`.
    pub fn locations(&self, source: &str) -> Vec<Option<Location>> {
        let index = LineIndex::new(source);
        self.lints
            .iter()
            .map(|lint| {
                self.flat
                    .source_span(&self.document, lint.span)
                    .map(|span| index.location(span))
            })
            .collect()
    }
}

/// Result of linting a single file.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    /// Path to the linted file.
    pub path: PathBuf,

    /// Lints found in the file.
    pub lints: Vec<Lint>,

    /// Source location of each lint, parallel to `lints`.
    pub locations: Vec<Option<Location>>,

    /// Whether the result was loaded from cache.
    #[serde(skip)]
    pub from_cache: bool,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(path: PathBuf, lints: Vec<Lint>, locations: Vec<Option<Location>>) -> Self {
        Self {
            path,
            lints,
            locations,
            from_cache: false,
        }
    }

    /// Returns true if any issues were found.
    pub fn has_issues(&self) -> bool {
        !self.lints.is_empty()
    }
}
