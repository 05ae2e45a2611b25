//! Applies span fixes to a document tree.
//!
//! A fix is expressed against the flattened text of the document. Applying it
//! means translating `[start, end)` back to the text nodes that produced those
//! bytes and editing them so that the next [`flatten`] shows exactly
//! `text[..start] + replacement + text[end..]`.

use scribelint_ast::{Document, Span};
use scribelint_plugin::Fix;
use tracing::{debug, warn};

use crate::FixError;
use crate::mapper::{FlatText, find_segment_index, flatten};

/// Bytes searched on each side of a fix's recorded offset when relocating it.
pub const RELOCATE_WINDOW: usize = 64;

/// A fix that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixFailure {
    pub fix: Fix,
    pub error: FixError,
}

/// Outcome of [`apply_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of fixes applied.
    pub applied: usize,
    /// Fixes that were skipped, with the reason.
    pub failed: Vec<FixFailure>,
}

impl BatchReport {
    /// Returns true if every fix was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replaces `span` of `flat.text` with `replacement` inside `doc`.
///
/// `flat` must be the current flattening of `doc`.
pub fn apply_one(
    doc: &mut Document,
    flat: &FlatText,
    span: Span,
    replacement: &str,
) -> Result<(), FixError> {
    if !span.is_valid_for(&flat.text) {
        return Err(FixError::InvalidSpan {
            span,
            len: flat.text.len(),
        });
    }
    if flat.crosses_boundary(span) {
        return Err(FixError::StraddlesBoundary { span });
    }

    let first = find_segment_index(&flat.segments, span.start)
        .ok_or(FixError::NoSegment(span.start))?;
    let last = find_segment_index(&flat.segments, span.end - 1)
        .ok_or(FixError::NoSegment(span.end - 1))?;

    let start_seg = flat.segments[first];
    let end_seg = flat.segments[last];
    if !start_seg.contains(span.start) || !end_seg.contains(span.end - 1) {
        return Err(FixError::NoSegment(span.start));
    }
    let (Some(start_node), Some(end_node)) = (start_seg.node, end_seg.node) else {
        return Err(FixError::NoSegment(span.start));
    };

    let local_start = (span.start - start_seg.start) as usize;

    if first == last {
        let local_end = (span.end - start_seg.start) as usize;
        return doc
            .replace_text_range(start_node, local_start..local_end, replacement)
            .then_some(())
            .ok_or(FixError::EditRejected);
    }

    let start_len = start_seg.span().len() as usize;
    if !doc.replace_text_range(start_node, local_start..start_len, replacement) {
        return Err(FixError::EditRejected);
    }
    for middle in &flat.segments[first + 1..last] {
        if let Some(id) = middle.node {
            doc.set_text(id, "");
        }
    }
    let local_end = (span.end - end_seg.start) as usize;
    if !doc.replace_text_range(end_node, 0..local_end, "") {
        return Err(FixError::EditRejected);
    }

    Ok(())
}

/// Applies several fixes computed against one snapshot of `doc`.
///
/// Fixes are applied from the end of the text to the beginning. Overlapping
/// fixes are dropped. Before each fix the document is flattened again and the
/// fix is relocated to the nearest occurrence of its original text, so that
/// edits made since the snapshot do not misplace it.
pub fn apply_batch(doc: &mut Document, fixes: Vec<Fix>) -> BatchReport {
    let mut report = BatchReport::default();

    let mut sorted = fixes;
    sorted.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let (kept, overlapping) = filter_overlapping_fixes(sorted);

    for fix in overlapping {
        warn!(
            "Skipping overlapping fix at [{}, {}]",
            fix.span.start, fix.span.end
        );
        report.failed.push(FixFailure {
            error: FixError::Overlapping { span: fix.span },
            fix,
        });
    }

    for fix in kept {
        let flat = flatten(doc);
        let result = relocate(&flat.text, &fix)
            .and_then(|span| apply_one(doc, &flat, span, &fix.text));

        match result {
            Ok(()) => {
                debug!(
                    "Applied fix: replace [{}..{}] with '{}'",
                    fix.span.start, fix.span.end, fix.text
                );
                report.applied += 1;
            }
            Err(error) => {
                warn!("Skipping fix at [{}, {}]: {}", fix.span.start, fix.span.end, error);
                report.failed.push(FixFailure { fix, error });
            }
        }
    }

    report
}

/// Splits fixes sorted by start descending into kept and overlapping ones.
///
/// Each candidate only needs checking against the last kept fix: it has the
/// smallest start of everything kept so far.
fn filter_overlapping_fixes(fixes: Vec<Fix>) -> (Vec<Fix>, Vec<Fix>) {
    #[cfg(debug_assertions)]
    {
        for window in fixes.windows(2) {
            debug_assert!(
                window[0].span.start >= window[1].span.start,
                "Fixes must be sorted by start descending for filter_overlapping_fixes"
            );
        }
    }

    let mut kept: Vec<Fix> = Vec::with_capacity(fixes.len());
    let mut dropped = Vec::new();

    for fix in fixes {
        let overlaps = kept.last().is_some_and(|last| {
            !(fix.span.end <= last.span.start || fix.span.start >= last.span.end)
        });
        if overlaps {
            dropped.push(fix);
        } else {
            kept.push(fix);
        }
    }

    (kept, dropped)
}

/// Finds where `fix` applies in `text`.
///
/// A fix without recorded original text is taken at face value. Otherwise the
/// recorded span is used when it still covers the original, then the nearest
/// occurrence within [`RELOCATE_WINDOW`] bytes, then the nearest anywhere.
fn relocate(text: &str, fix: &Fix) -> Result<Span, FixError> {
    if fix.original.is_empty() || fix.span.slice(text) == Some(fix.original.as_str()) {
        return Ok(fix.span);
    }

    let start = fix.span.start as usize;
    let lo = floor_boundary(text, start.saturating_sub(RELOCATE_WINDOW));
    let hi = ceil_boundary(text, (fix.span.end as usize).saturating_add(RELOCATE_WINDOW));

    let found = nearest(&text[lo..hi], &fix.original, start, lo)
        .or_else(|| nearest(text, &fix.original, start, 0))
        .ok_or_else(|| FixError::NotFound(fix.original.clone()))?;

    debug!(from = fix.span.start, to = found, "relocated fix");
    Ok(Span::from_range(found..found + fix.original.len()))
}

fn nearest(haystack: &str, needle: &str, target: usize, base: usize) -> Option<usize> {
    haystack
        .match_indices(needle)
        .map(|(i, _)| base + i)
        .min_by_key(|pos| pos.abs_diff(target))
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use scribelint_ast::{NodeId, NodeKind};

    fn doc_from(paragraphs: &[&[&str]]) -> Document {
        let mut doc = Document::new();
        for parts in paragraphs {
            let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
            for part in *parts {
                doc.append_text(para, NodeKind::Str, *part);
            }
        }
        doc
    }

    fn text_of(doc: &Document) -> String {
        flatten(doc).text
    }

    #[test]
    fn single_node_replacement() {
        let mut doc = doc_from(&[&["he don't like it"]]);
        let flat = flatten(&doc);

        apply_one(&mut doc, &flat, Span::new(0, 8), "he doesn't").unwrap();
        assert_eq!(text_of(&doc), "he doesn't like it");
    }

    #[test]
    fn multi_node_replacement() {
        let mut doc = Document::new();
        let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
        doc.append_text(para, NodeKind::Str, "a very ");
        let strong = doc.append_parent(para, NodeKind::Strong);
        doc.append_text(strong, NodeKind::Str, "very");
        doc.append_text(para, NodeKind::Str, " unique idea");

        let flat = flatten(&doc);
        assert_eq!(flat.text, "a very very unique idea");

        apply_one(&mut doc, &flat, Span::new(2, 18), "unique").unwrap();
        assert_eq!(text_of(&doc), "a unique idea");
        assert_eq!(doc.text(doc.children(strong)[0]), Some(""));
    }

    #[test]
    fn straddling_span_is_refused() {
        let mut doc = doc_from(&[&["first"], &["second"]]);
        let flat = flatten(&doc);

        let err = apply_one(&mut doc, &flat, Span::new(3, 8), "x").unwrap_err();
        assert_eq!(err, FixError::StraddlesBoundary { span: Span::new(3, 8) });
        assert_eq!(text_of(&doc), "first\nsecond");
    }

    #[test]
    fn invalid_span_is_refused() {
        let mut doc = doc_from(&[&["short"]]);
        let flat = flatten(&doc);

        assert!(matches!(
            apply_one(&mut doc, &flat, Span::new(2, 20), "x"),
            Err(FixError::InvalidSpan { len: 5, .. })
        ));
        assert!(matches!(
            apply_one(&mut doc, &flat, Span::new(2, 2), "x"),
            Err(FixError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn batch_applies_from_the_end() {
        let mut doc = doc_from(&[&["alot of irregardless text"]]);
        let fixes = vec![
            Fix::new(Span::new(0, 4), "a lot").with_original("alot"),
            Fix::new(Span::new(8, 20), "regardless").with_original("irregardless"),
        ];

        let report = apply_batch(&mut doc, fixes);
        assert_eq!(report.applied, 2);
        assert!(report.is_complete());
        assert_eq!(text_of(&doc), "a lot of regardless text");
    }

    #[test]
    fn batch_drops_overlapping_fixes() {
        let mut doc = doc_from(&[&["abcdefghij"]]);
        let fixes = vec![
            Fix::new(Span::new(0, 5), "X").with_original("abcde"),
            Fix::new(Span::new(3, 8), "Y").with_original("defgh"),
        ];

        let report = apply_batch(&mut doc, fixes);
        assert_eq!(report.applied, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].fix.span, Span::new(0, 5));
        assert_eq!(text_of(&doc), "abcYij");
    }

    #[test]
    fn batch_relocates_after_drift() {
        let mut doc = doc_from(&[&["the teh cat"]]);
        // The fix below was computed before "so " was prepended.
        let para = doc.children(doc.root())[0];
        let node: NodeId = doc.children(para)[0];
        doc.set_text(node, "so the teh cat");

        let report = apply_batch(&mut doc, vec![Fix::new(Span::new(4, 7), "the").with_original("teh")]);
        assert_eq!(report.applied, 1);
        assert_eq!(text_of(&doc), "so the the cat");
    }

    #[test]
    fn batch_relocates_beyond_the_window() {
        let mut doc = doc_from(&[&["the teh end"]]);
        let para = doc.children(doc.root())[0];
        let node = doc.children(para)[0];
        let padding = "x ".repeat(100);
        doc.set_text(node, format!("{padding}the teh end"));

        let report = apply_batch(&mut doc, vec![Fix::new(Span::new(4, 7), "the").with_original("teh")]);
        assert_eq!(report.applied, 1);
        assert_eq!(text_of(&doc), format!("{padding}the the end"));
    }

    #[test]
    fn batch_relocates_to_the_nearest_match() {
        let filler = "b".repeat(50);
        let mut doc = doc_from(&[&["placeholder"]]);
        let para = doc.children(doc.root())[0];
        let node = doc.children(para)[0];
        // Recorded at 50; the real occurrence drifted to 53, a decoy sits at 0.
        doc.set_text(node, format!("teh{filler}teh end"));

        let report = apply_batch(&mut doc, vec![Fix::new(Span::new(50, 53), "the").with_original("teh")]);
        assert_eq!(report.applied, 1);
        assert_eq!(text_of(&doc), format!("teh{filler}the end"));
    }

    #[test]
    fn emptying_a_block_keeps_a_single_boundary() {
        let mut doc = doc_from(&[&["ab"], &["cd"], &["ef"]]);
        let flat = flatten(&doc);
        assert_eq!(flat.text, "ab\ncd\nef");

        apply_one(&mut doc, &flat, Span::new(3, 5), "").unwrap();
        assert_eq!(text_of(&doc), "ab\nef");
    }

    #[test]
    fn batch_reports_unlocatable_and_straddling_fixes() {
        let mut doc = doc_from(&[&["one two"], &["three"]]);
        let fixes = vec![
            Fix::new(Span::new(10, 13), "3").with_original("xyz"),
            Fix::new(Span::new(5, 9), "x").with_original("wo\nt"),
            Fix::new(Span::new(0, 3), "1").with_original("one"),
        ];

        let report = apply_batch(&mut doc, fixes);
        assert_eq!(report.applied, 1);
        let errors: Vec<&FixError> = report.failed.iter().map(|f| &f.error).collect();
        assert_eq!(errors[0], &FixError::NotFound("xyz".to_string()));
        assert!(matches!(errors[1], FixError::StraddlesBoundary { .. }));
        assert_eq!(text_of(&doc), "1 two\nthree");
    }

    fn arb_paragraphs() -> impl Strategy<Value = Vec<Vec<String>>> {
        prop::collection::vec(prop::collection::vec("[a-z ]{1,6}", 1..4), 1..4)
    }

    fn build(paragraphs: &[Vec<String>]) -> Document {
        let mut doc = Document::new();
        for parts in paragraphs {
            let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
            for (i, part) in parts.iter().enumerate() {
                if i % 2 == 1 {
                    let em = doc.append_parent(para, NodeKind::Emphasis);
                    doc.append_text(em, NodeKind::Str, part.as_str());
                } else {
                    doc.append_text(para, NodeKind::Str, part.as_str());
                }
            }
        }
        doc
    }

    proptest! {
        #[test]
        fn apply_one_round_trips(
            paragraphs in arb_paragraphs(),
            a in 0usize..64,
            b in 0usize..64,
            replacement in "[a-z]{1,4}",
        ) {
            let mut doc = build(&paragraphs);
            let flat = flatten(&doc);
            let len = flat.text.len();
            let start = a % len;
            let end = start + 1 + b % (len - start);
            let span = Span::new(start as u32, end as u32);
            prop_assume!(!flat.crosses_boundary(span));

            let expected = format!("{}{}{}", &flat.text[..start], replacement, &flat.text[end..]);
            apply_one(&mut doc, &flat, span, &replacement).unwrap();
            prop_assert_eq!(flatten(&doc).text, expected);
        }

        #[test]
        fn batch_matches_one_at_a_time(
            paragraphs in arb_paragraphs(),
            cuts in prop::collection::btree_set(0usize..64, 0..8),
            replacement in "[a-z]{1,3}",
        ) {
            let snapshot = flatten(&build(&paragraphs));
            let len = snapshot.text.len();

            // Disjoint single-byte fixes that stay inside real segments.
            let fixes: Vec<Fix> = cuts
                .into_iter()
                .filter(|c| *c < len)
                .map(|c| Span::new(c as u32, c as u32 + 1))
                .filter(|span| !snapshot.crosses_boundary(*span))
                .map(|span| Fix::new(span, replacement.as_str()))
                .collect();

            let mut batched = build(&paragraphs);
            let report = apply_batch(&mut batched, fixes.clone());
            prop_assert_eq!(report.applied, fixes.len());

            let mut stepwise = build(&paragraphs);
            let mut ordered = fixes;
            ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));
            for fix in &ordered {
                let flat = flatten(&stepwise);
                apply_one(&mut stepwise, &flat, fix.span, &fix.text).unwrap();
            }

            let mut expected = snapshot.text.clone();
            for fix in &ordered {
                expected.replace_range(fix.span.range(), &fix.text);
            }
            prop_assert_eq!(flatten(&batched).text, flatten(&stepwise).text);
            prop_assert_eq!(flatten(&batched).text, expected);
        }
    }
}
