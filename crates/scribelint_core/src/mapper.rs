//! Flat text view of a document tree.
//!
//! [`flatten`] renders a [`Document`] into one string and a list of
//! [`Segment`]s recording which node every byte range came from. Block
//! structure shows up as synthetic `\n` segments so that words from
//! different blocks are never glued together.

use std::ops::ControlFlow;

use scribelint_ast::{Document, NodeId, NodeKind, Span, VisitResult, Visitor, walk_node};

/// One contiguous range of the flattened text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Start offset in the flattened text.
    pub start: u32,
    /// End offset (exclusive) in the flattened text.
    pub end: u32,
    /// The text node this range was copied from. `None` for synthetic segments.
    pub node: Option<NodeId>,
    /// True for inserted boundary characters.
    pub synthetic: bool,
    /// The inserted character of a synthetic segment.
    pub ch: Option<char>,
}

impl Segment {
    fn real(start: u32, end: u32, node: NodeId) -> Self {
        Self {
            start,
            end,
            node: Some(node),
            synthetic: false,
            ch: None,
        }
    }

    fn boundary(start: u32, ch: char) -> Self {
        Self {
            start,
            end: start + ch.len_utf8() as u32,
            node: None,
            synthetic: true,
            ch: Some(ch),
        }
    }

    /// Returns the segment's range as a span.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Returns true if `offset` falls inside the segment.
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A document rendered as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatText {
    /// The flattened text.
    pub text: String,
    /// Segments in text order, covering `text` without gaps.
    pub segments: Vec<Segment>,
}

impl FlatText {
    /// Spans of text copied from code nodes.
    pub fn code_spans(&self, doc: &Document) -> Vec<Span> {
        self.segments
            .iter()
            .filter(|s| s.node.is_some_and(|id| doc.kind(id).is_code()))
            .map(Segment::span)
            .collect()
    }

    /// Returns true if any synthetic segment intersects `span`.
    pub fn crosses_boundary(&self, span: Span) -> bool {
        self.segments
            .iter()
            .filter(|s| s.synthetic)
            .any(|s| s.span().overlaps(&span))
    }

    /// Maps a flattened offset back to the original source, through the
    /// source span of the node it was copied from.
    ///
    /// Offsets on a synthetic boundary map to the start of the next real
    /// segment.
    pub fn source_offset(&self, doc: &Document, offset: u32) -> Option<u32> {
        let segment = find_segment_at(&self.segments, offset)?;
        let source = doc.node(segment.node?).source?;
        if segment.contains(offset) {
            Some(source.start + (offset - segment.start))
        } else {
            Some(source.start)
        }
    }

    /// Maps a flattened span back to the original source.
    ///
    /// The end is resolved through the last byte of the span.
    pub fn source_span(&self, doc: &Document, span: Span) -> Option<Span> {
        if span.is_empty() {
            return None;
        }
        let start = self.source_offset(doc, span.start)?;
        let end = self.source_offset(doc, span.end - 1)? + 1;
        (start < end).then_some(Span::new(start, end))
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Flattens `doc` depth-first.
pub fn flatten(doc: &Document) -> FlatText {
    let mut flattener = Flattener::default();
    let _ = walk_node(&mut flattener, doc, doc.root());
    flattener.flat
}

/// Returns the real segment containing `offset`, or the nearest real segment
/// after it when `offset` sits on a synthetic boundary. `None` past the end.
pub fn find_segment_at(segments: &[Segment], offset: u32) -> Option<&Segment> {
    find_segment_index(segments, offset).map(|i| &segments[i])
}

/// Index form of [`find_segment_at`].
pub fn find_segment_index(segments: &[Segment], offset: u32) -> Option<usize> {
    let first = segments.partition_point(|s| s.end <= offset);
    segments[first..]
        .iter()
        .position(|s| !s.synthetic)
        .map(|i| first + i)
}

#[derive(Default)]
struct Flattener {
    flat: FlatText,
    /// A block closed; the next real segment needs a boundary first.
    pending_boundary: bool,
}

impl Flattener {
    fn offset(&self) -> u32 {
        self.flat.text.len() as u32
    }

    fn push_synthetic(&mut self, ch: char) {
        let segment = Segment::boundary(self.offset(), ch);
        self.flat.text.push(ch);
        self.flat.segments.push(segment);
    }

    /// Inserts a line boundary unless nothing was emitted yet or the text
    /// already ends in one.
    fn boundary(&mut self) {
        self.pending_boundary = false;
        match self.flat.segments.last() {
            None => {}
            Some(last) if last.synthetic => {}
            Some(_) => self.push_synthetic('\n'),
        }
    }
}

fn is_block(kind: &NodeKind) -> bool {
    *kind != NodeKind::Document && !kind.is_inline()
}

impl Visitor for Flattener {
    fn enter_node(&mut self, doc: &Document, id: NodeId) -> VisitResult {
        if is_block(doc.kind(id)) {
            self.boundary();
        }
        ControlFlow::Continue(())
    }

    fn exit_node(&mut self, doc: &Document, id: NodeId) -> VisitResult {
        if is_block(doc.kind(id)) {
            self.pending_boundary = true;
        }
        ControlFlow::Continue(())
    }

    fn visit_text(&mut self, _doc: &Document, id: NodeId, text: &str) -> VisitResult {
        if text.is_empty() {
            return ControlFlow::Continue(());
        }
        if self.pending_boundary {
            self.boundary();
        }
        let start = self.offset();
        self.flat.text.push_str(text);
        self.flat.segments.push(Segment::real(start, self.offset(), id));
        ControlFlow::Continue(())
    }

    fn visit_break(&mut self, _doc: &Document, _id: NodeId) -> VisitResult {
        self.push_synthetic('\n');
        ControlFlow::Continue(())
    }
}
