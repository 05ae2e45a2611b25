//! Editable document tree.

use serde::Serialize;

use crate::{NodeKind, Span};

/// Stable identity of a node within one [`Document`].
///
/// Ids are never reused: removing a node from its parent detaches it but
/// keeps its slot, so ids captured before an edit still resolve afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the raw index of this id.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// The kind of this node.
    pub kind: NodeKind,
    /// Parent node, `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// Text content for text-bearing leaves.
    pub value: Option<String>,
    /// Byte span of `value` in the original source, when `value` is a
    /// verbatim copy of it.
    pub source: Option<Span>,
    #[serde(skip)]
    dirty: bool,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>, value: Option<String>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            value,
            source: None,
            dirty: false,
        }
    }
}

/// A byte-span replacement against the original source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEdit {
    /// Range of the original source to replace.
    pub span: Span,
    /// Replacement text.
    pub text: String,
}

/// An arena-backed tree of typed nodes.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None, None)],
            root: NodeId(0),
        }
    }

    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node for `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the kind of `id`.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Returns the children of `id`.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Returns the parent of `id`.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the text of a text-bearing node.
    #[inline]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).value.as_deref()
    }

    /// Returns the number of node slots (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates every node id, attached or not, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Returns true if the document holds only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Appends a container node under `parent`.
    pub fn append_parent(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.push(parent, Node::new(kind, Some(parent), None))
    }

    /// Appends a text-bearing leaf under `parent`.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        value: impl Into<String>,
    ) -> NodeId {
        self.push(parent, Node::new(kind, Some(parent), Some(value.into())))
    }

    /// Appends a leaf with no text (breaks, rules, images).
    pub fn append_leaf(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.push(parent, Node::new(kind, Some(parent), None))
    }

    /// Records where the text of `id` came from in the original source.
    pub fn set_source(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].source = Some(span);
    }

    /// Replaces the whole text of a text-bearing node.
    ///
    /// Returns false if `id` carries no text.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        let node = &mut self.nodes[id.index()];
        match node.value.as_mut() {
            Some(current) => {
                *current = value.into();
                node.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Replaces `range` (byte offsets local to the node) of a text node.
    ///
    /// Returns false if `id` carries no text or the range is out of bounds or
    /// not on char boundaries.
    pub fn replace_text_range(
        &mut self,
        id: NodeId,
        range: std::ops::Range<usize>,
        replacement: &str,
    ) -> bool {
        let node = &mut self.nodes[id.index()];
        let Some(value) = node.value.as_mut() else {
            return false;
        };
        if range.start > range.end
            || range.end > value.len()
            || !value.is_char_boundary(range.start)
            || !value.is_char_boundary(range.end)
        {
            return false;
        }
        value.replace_range(range, replacement);
        node.dirty = true;
        true
    }

    /// Returns true if the text of `id` has been edited since construction.
    #[inline]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.node(id).dirty
    }

    /// Moves `id` to become the last child of `new_parent`.
    ///
    /// Returns false if the move would create a cycle or `id` is the root.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> bool {
        if id == self.root || self.is_ancestor(id, new_parent) {
            return false;
        }
        if let Some(old) = self.nodes[id.index()].parent {
            self.nodes[old.index()].children.retain(|c| *c != id);
        }
        self.nodes[new_parent.index()].children.push(id);
        self.nodes[id.index()].parent = Some(new_parent);
        true
    }

    /// Detaches `id` from its parent. The slot stays addressable.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(old) = self.nodes[id.index()].parent.take() {
            self.nodes[old.index()].children.retain(|c| *c != id);
        }
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Returns true if `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_ancestor(self.root, id)
    }

    /// Collects source replacements for every edited, attached text node.
    ///
    /// Edited nodes without a recorded source span cannot be written back and
    /// are returned separately.
    pub fn source_edits(&self) -> (Vec<SourceEdit>, Vec<NodeId>) {
        let mut edits = Vec::new();
        let mut unmapped = Vec::new();

        for (index, node) in self.nodes.iter().enumerate() {
            if !node.dirty {
                continue;
            }
            let id = NodeId(index as u32);
            if !self.is_attached(id) {
                continue;
            }
            match (node.source, node.value.as_ref()) {
                (Some(span), Some(value)) => edits.push(SourceEdit {
                    span,
                    text: value.clone(),
                }),
                _ => unmapped.push(id),
            }
        }

        (edits, unmapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
        let text = doc.append_text(para, NodeKind::Str, "Hello world");
        doc.set_source(text, Span::new(2, 13));
        (doc, para, text)
    }

    #[test]
    fn builds_tree() {
        let (doc, para, text) = sample();
        assert_eq!(doc.children(doc.root()), &[para]);
        assert_eq!(doc.parent(text), Some(para));
        assert_eq!(doc.text(text), Some("Hello world"));
        assert_eq!(doc.kind(para), &NodeKind::Paragraph);
        assert!(!doc.is_empty());
    }

    #[test]
    fn replace_text_range_marks_dirty() {
        let (mut doc, _, text) = sample();
        assert!(!doc.is_dirty(text));
        assert!(doc.replace_text_range(text, 6..11, "there"));
        assert_eq!(doc.text(text), Some("Hello there"));
        assert!(doc.is_dirty(text));
    }

    #[test]
    fn replace_text_range_rejects_bad_ranges() {
        let mut doc = Document::new();
        let text = doc.append_text(doc.root(), NodeKind::Str, "né");
        assert!(!doc.replace_text_range(text, 0..2, "x"));
        assert!(!doc.replace_text_range(text, 0..9, "x"));
        assert!(!doc.replace_text_range(doc.root(), 0..0, "x"));
        assert!(!doc.is_dirty(text));
    }

    #[test]
    fn reparent_moves_node_and_refuses_cycles() {
        let (mut doc, para, text) = sample();
        let quote = doc.append_parent(doc.root(), NodeKind::BlockQuote);
        assert!(doc.reparent(para, quote));
        assert_eq!(doc.children(doc.root()), &[quote]);
        assert_eq!(doc.children(quote), &[para]);
        assert!(!doc.reparent(quote, text));
        assert!(!doc.reparent(doc.root(), quote));
    }

    #[test]
    fn source_edits_only_for_dirty_attached_nodes() {
        let (mut doc, para, text) = sample();
        let orphan = doc.append_text(para, NodeKind::Str, "gone");
        let floating = doc.append_text(para, NodeKind::Str, "no source");

        doc.set_text(text, "Hi world");
        doc.set_text(orphan, "still gone");
        doc.detach(orphan);
        doc.set_text(floating, "edited");

        let (edits, unmapped) = doc.source_edits();
        assert_eq!(
            edits,
            vec![SourceEdit {
                span: Span::new(2, 13),
                text: "Hi world".to_string()
            }]
        );
        assert_eq!(unmapped, vec![floating]);
    }
}
