//! Visitor pattern for document traversal.
//!
//! # Overview
//!
//! - [`Visitor`] - Read-only traversal trait with enter/exit hooks
//! - [`walk_node`] - Depth-first dispatch starting at one node
//! - [`walk_children`] - Traverse all children of a node
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use scribelint_ast::{Document, NodeId, NodeKind};
//! use scribelint_ast::visitor::{VisitResult, Visitor, walk_node};
//!
//! struct TextCollector(Vec<String>);
//!
//! impl Visitor for TextCollector {
//!     fn visit_text(&mut self, _doc: &Document, _id: NodeId, text: &str) -> VisitResult {
//!         self.0.push(text.to_string());
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut doc = Document::new();
//! let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
//! doc.append_text(para, NodeKind::Str, "hello");
//!
//! let mut collector = TextCollector(Vec::new());
//! let _ = walk_node(&mut collector, &doc, doc.root());
//! assert_eq!(collector.0, vec!["hello"]);
//! ```

mod walk;

use std::ops::ControlFlow;

use crate::{Document, NodeId};

pub use walk::{walk_children, walk_node};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - keep walking
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing a [`Document`] without modification.
///
/// Every method defaults to continuing, so implementors override only the
/// hooks they need.
pub trait Visitor {
    /// Called before a node's own content and children.
    fn enter_node(&mut self, _doc: &Document, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after a node's children.
    fn exit_node(&mut self, _doc: &Document, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called for text-bearing leaves (`Str`, `Code`, `CodeBlock`).
    fn visit_text(&mut self, _doc: &Document, _id: NodeId, _text: &str) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called for forced line breaks.
    fn visit_break(&mut self, _doc: &Document, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }
}
