//! Multi-source lint merge.
//!
//! Lints from the grammar engine, the pattern rules, the clause detector and
//! the AI reviewer are combined into one list whose spans never overlap.
//! Candidates are ordered by start offset and, on ties, by
//! [`LintSource`](scribelint_plugin::LintSource) priority; the first
//! candidate to claim a region keeps it.

use scribelint_ast::SpanSet;
use scribelint_plugin::Lint;
use tracing::debug;

/// Merges lint lists computed against one text snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LintAggregator<'t> {
    text: &'t str,
}

impl<'t> LintAggregator<'t> {
    /// Creates an aggregator for `text`.
    pub fn new(text: &'t str) -> Self {
        Self { text }
    }

    /// Merges engine, pattern (rules and clause detector) and optional AI
    /// lints into one sorted, non-overlapping list.
    pub fn merge(&self, engine: Vec<Lint>, pattern: Vec<Lint>, ai: Option<Vec<Lint>>) -> Vec<Lint> {
        let candidates = engine
            .into_iter()
            .chain(pattern)
            .chain(ai.into_iter().flatten())
            .collect();
        self.accept(candidates, &mut SpanSet::new())
    }

    /// Splices late AI lints into `current`.
    ///
    /// Returns `None` when `snapshot` (the text the AI reviewed) is no longer
    /// `current_text`. Otherwise AI lints are accepted only where no current
    /// lint sits, and the combined list is re-sorted.
    pub fn splice_ai(
        current: &[Lint],
        snapshot: &str,
        current_text: &str,
        ai: Vec<Lint>,
    ) -> Option<Vec<Lint>> {
        if snapshot != current_text {
            debug!("dropping AI lints for a stale snapshot");
            return None;
        }

        let mut occupied = SpanSet::from_spans(current.iter().map(|l| l.span));
        let accepted = LintAggregator::new(current_text).accept(ai, &mut occupied);

        let mut merged: Vec<Lint> = current.iter().cloned().chain(accepted).collect();
        sort_lints(&mut merged);
        Some(merged)
    }

    fn accept(&self, mut candidates: Vec<Lint>, occupied: &mut SpanSet) -> Vec<Lint> {
        sort_lints(&mut candidates);

        let mut accepted = Vec::with_capacity(candidates.len());
        for lint in candidates {
            if !lint.is_consistent_with(self.text) {
                debug!(
                    start = lint.span.start,
                    end = lint.span.end,
                    source = ?lint.source,
                    "dropping lint inconsistent with snapshot"
                );
                continue;
            }
            if occupied.claim(lint.span) {
                accepted.push(lint);
            }
        }
        accepted
    }
}

/// Stable sort by start offset, then source priority.
pub fn sort_lints(lints: &mut [Lint]) {
    lints.sort_by_key(|lint| (lint.span.start, lint.source));
}
