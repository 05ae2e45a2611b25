//! Append-only set of claimed half-open ranges.
//!
//! One `SpanSet` is created per lint pass and threaded through every stage
//! (engine output, pattern rules, clause detection, aggregation) so that no
//! two accepted lints ever cover the same text.

use crate::Span;

/// A sorted collection of disjoint half-open ranges.
///
/// Members that overlap on insertion are coalesced into their union, which
/// keeps queries at `O(log n)`: overlap with the union is the same question as
/// overlap with any of the original members. Adjacent ranges stay separate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary spans (empty ones are ignored).
    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        let mut set = Self::new();
        for span in spans {
            set.insert(span.start, span.end);
        }
        set
    }

    /// Returns true if `[start, end)` intersects any member.
    ///
    /// Zero-length and inverted ranges never overlap.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        if start >= end {
            return false;
        }
        let idx = self.spans.partition_point(|s| s.end <= start);
        self.spans.get(idx).is_some_and(|s| s.start < end)
    }

    /// Span form of [`SpanSet::overlaps`].
    #[inline]
    pub fn overlaps_span(&self, span: Span) -> bool {
        self.overlaps(span.start, span.end)
    }

    /// Claims `[start, end)`. Returns false for zero-length or inverted ranges.
    pub fn insert(&mut self, start: u32, end: u32) -> bool {
        if start >= end {
            return false;
        }

        let first = self.spans.partition_point(|s| s.end <= start);
        let last = self.spans.partition_point(|s| s.start < end);

        let mut merged = Span::new(start, end);
        if first < last {
            merged.start = merged.start.min(self.spans[first].start);
            merged.end = merged.end.max(self.spans[last - 1].end);
        }
        self.spans.splice(first..last, std::iter::once(merged));
        true
    }

    /// Span form of [`SpanSet::insert`].
    #[inline]
    pub fn insert_span(&mut self, span: Span) -> bool {
        self.insert(span.start, span.end)
    }

    /// Claims `span` only if it is free. Returns whether it was claimed.
    pub fn claim(&mut self, span: Span) -> bool {
        if span.is_empty() || self.overlaps_span(span) {
            return false;
        }
        self.insert_span(span)
    }

    /// Iterates the (coalesced) members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Returns the number of (coalesced) members.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if nothing has been claimed.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_set_overlaps_nothing() {
        let set = SpanSet::new();
        assert!(!set.overlaps(0, 100));
        assert!(set.is_empty());
    }

    #[rstest]
    #[case::identical(10, 20, true)]
    #[case::inside(12, 15, true)]
    #[case::covering(0, 30, true)]
    #[case::left_straddle(5, 11, true)]
    #[case::right_straddle(19, 25, true)]
    #[case::adjacent_left(5, 10, false)]
    #[case::adjacent_right(20, 25, false)]
    #[case::disjoint(40, 50, false)]
    #[case::zero_length_inside(15, 15, false)]
    #[case::inverted(18, 12, false)]
    fn overlap_boundaries(#[case] start: u32, #[case] end: u32, #[case] expected: bool) {
        let mut set = SpanSet::new();
        set.insert(10, 20);
        assert_eq!(set.overlaps(start, end), expected);
    }

    #[test]
    fn zero_length_insert_is_rejected() {
        let mut set = SpanSet::new();
        assert!(!set.insert(5, 5));
        assert!(!set.insert(7, 3));
        assert!(set.is_empty());
    }

    #[test]
    fn adjacent_spans_coexist() {
        let mut set = SpanSet::new();
        assert!(set.claim(Span::new(0, 5)));
        assert!(set.claim(Span::new(5, 8)));
        assert_eq!(set.len(), 2);
        assert!(!set.claim(Span::new(4, 6)));
    }

    #[test]
    fn overlapping_inserts_coalesce() {
        let mut set = SpanSet::new();
        set.insert(0, 5);
        set.insert(10, 15);
        set.insert(3, 12);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![Span::new(0, 15)]);
        assert!(set.overlaps(14, 20));
        assert!(!set.overlaps(15, 20));
    }

    #[test]
    fn inserts_out_of_order_stay_sorted() {
        let set = SpanSet::from_spans([Span::new(30, 35), Span::new(0, 2), Span::new(10, 12)]);
        let starts: Vec<u32> = set.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 10, 30]);
        assert!(set.overlaps(11, 31));
        assert!(!set.overlaps(12, 30));
    }

    #[test]
    fn claim_refuses_taken_region() {
        let mut set = SpanSet::new();
        assert!(set.claim(Span::new(0, 5)));
        assert!(!set.claim(Span::new(3, 8)));
        assert!(!set.claim(Span::new(9, 9)));
        assert_eq!(set.len(), 1);
    }
}
