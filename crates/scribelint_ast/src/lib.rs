//! # scribelint_ast
//!
//! Positional and structural types shared by every scribelint crate.
//!
//! This crate provides:
//! - [`Span`], [`Position`] and [`Location`] for addressing text snapshots
//! - [`SpanSet`], the per-pass "occupied" set that keeps lint spans disjoint
//! - [`Document`], an editable arena tree of typed nodes that fixes are
//!   applied to
//!
//! ## Architecture
//!
//! Nodes live in a single `Vec` owned by the [`Document`] and are addressed by
//! [`NodeId`]. Unlike a borrow-based tree, this lets fix application edit
//! text leaves and re-parent containers in place while the ids held by a
//! previously computed offset map stay meaningful.
//!
//! ## Example
//!
//! ```rust
//! use scribelint_ast::{Document, NodeKind};
//!
//! let mut doc = Document::new();
//! let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
//! doc.append_text(para, NodeKind::Str, "Hello");
//!
//! assert_eq!(doc.children(para).len(), 1);
//! ```

mod document;
mod node_kind;
mod span;
mod span_set;
pub mod visitor;

pub use document::{Document, Node, NodeId, SourceEdit};
pub use node_kind::NodeKind;
pub use span::{LineIndex, Location, Position, Span};
pub use span_set::SpanSet;

pub use visitor::{VisitResult, Visitor, walk_node};
