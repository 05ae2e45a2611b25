//! Writing edited documents back to their source.

use std::fs;
use std::path::Path;

use scribelint_ast::{Document, SourceEdit};
use scribelint_plugin::Fix;
use tracing::{debug, warn};

use crate::LintError;
use crate::applicator::{BatchReport, apply_batch};

/// Result of applying edits to source content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixerResult {
    /// Number of edits applied.
    pub fixes_applied: usize,
    /// Edited text nodes with no source span to write them to.
    pub unmapped: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content was modified.
    pub modified: bool,
}

impl FixerResult {
    /// Creates a new fixer result.
    pub fn new(fixes_applied: usize, fixed_content: String, modified: bool) -> Self {
        Self {
            fixes_applied,
            unmapped: 0,
            fixed_content,
            modified,
        }
    }

    /// Creates a result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self::new(0, content, false)
    }
}

/// Outcome of fixing one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// What happened to each fix in the tree.
    pub report: BatchReport,
    /// The rewritten source.
    pub result: FixerResult,
}

/// Applies source edits to content.
///
/// Edits are applied from the end of the content to the beginning to avoid
/// offset issues.
pub fn apply_edits_to_content(content: &str, edits: &[SourceEdit]) -> FixerResult {
    if edits.is_empty() {
        return FixerResult::unchanged(content.to_string());
    }

    let mut sorted: Vec<&SourceEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let sorted = filter_overlapping_edits(sorted);

    let mut result = content.to_string();
    let mut applied = 0;

    for edit in &sorted {
        let range = edit.span.range();
        if range.start > range.end
            || range.end > result.len()
            || !result.is_char_boundary(range.start)
            || !result.is_char_boundary(range.end)
        {
            warn!(
                "Invalid edit span: start={}, end={}, content_len={}",
                range.start,
                range.end,
                result.len()
            );
            continue;
        }

        debug!(
            "Applying edit: replace [{}..{}] with '{}'",
            range.start, range.end, edit.text
        );
        result.replace_range(range, &edit.text);
        applied += 1;
    }

    let modified = result != content;
    FixerResult::new(applied, result, modified)
}

/// Keeps edits that do not overlap an already kept one.
///
/// Expects `edits` sorted by start descending.
fn filter_overlapping_edits(edits: Vec<&SourceEdit>) -> Vec<&SourceEdit> {
    let mut kept: Vec<&SourceEdit> = Vec::with_capacity(edits.len());

    for edit in edits {
        let overlaps = kept.last().is_some_and(|last| {
            !(edit.span.end <= last.span.start || edit.span.start >= last.span.end)
        });
        if overlaps {
            warn!(
                "Skipping overlapping edit at [{}, {}]",
                edit.span.start, edit.span.end
            );
        } else {
            kept.push(edit);
        }
    }

    kept
}

/// Rewrites `source` with the text of every edited node of `doc`.
pub fn write_back(source: &str, doc: &Document) -> FixerResult {
    let (edits, unmapped) = doc.source_edits();
    if !unmapped.is_empty() {
        warn!(
            "{} edited node(s) have no source position and were not written",
            unmapped.len()
        );
    }

    let mut result = apply_edits_to_content(source, &edits);
    result.unmapped = unmapped.len();
    result
}

/// Applies `fixes` to `doc` (parsed from `source`) and renders the new source.
pub fn fix_source(source: &str, doc: &mut Document, fixes: Vec<Fix>) -> FixOutcome {
    let report = apply_batch(doc, fixes);
    let result = write_back(source, doc);
    FixOutcome { report, result }
}

/// Applies `fixes` to the file at `path` and writes the result.
///
/// `doc` must have been parsed from the current content of the file.
pub fn apply_fixes_to_file(
    path: &Path,
    doc: &mut Document,
    fixes: Vec<Fix>,
) -> Result<FixOutcome, LintError> {
    let content = fs::read_to_string(path)
        .map_err(|e| LintError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let outcome = fix_source(&content, doc, fixes);

    if outcome.result.modified {
        fs::write(path, &outcome.result.fixed_content)
            .map_err(|e| LintError::file(format!("Failed to write {}: {}", path.display(), e)))?;
    }

    Ok(outcome)
}
