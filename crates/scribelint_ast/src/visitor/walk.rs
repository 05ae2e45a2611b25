//! Walk functions for document traversal.

use crate::{Document, NodeId, NodeKind};

use super::{VisitResult, Visitor};

/// Walks `id` and its subtree depth-first.
///
/// 1. Calls `enter_node`
/// 2. Calls `visit_break` or `visit_text` depending on the node kind
/// 3. Walks the children in order
/// 4. Calls `exit_node`
pub fn walk_node<V>(visitor: &mut V, doc: &Document, id: NodeId) -> VisitResult
where
    V: Visitor + ?Sized,
{
    visitor.enter_node(doc, id)?;

    let kind = doc.kind(id);
    if *kind == NodeKind::Break {
        visitor.visit_break(doc, id)?;
    } else if kind.is_text_bearing()
        && let Some(text) = doc.text(id)
    {
        visitor.visit_text(doc, id, text)?;
    }

    walk_children(visitor, doc, id)?;

    visitor.exit_node(doc, id)
}

/// Walks every child of `id` in order.
pub fn walk_children<V>(visitor: &mut V, doc: &Document, id: NodeId) -> VisitResult
where
    V: Visitor + ?Sized,
{
    for &child in doc.children(id) {
        walk_node(visitor, doc, child)?;
    }
    std::ops::ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visitor for Trace {
        fn enter_node(&mut self, doc: &Document, id: NodeId) -> VisitResult {
            self.0.push(format!("enter {}", doc.kind(id).name()));
            ControlFlow::Continue(())
        }

        fn exit_node(&mut self, doc: &Document, id: NodeId) -> VisitResult {
            self.0.push(format!("exit {}", doc.kind(id).name()));
            ControlFlow::Continue(())
        }

        fn visit_text(&mut self, _doc: &Document, _id: NodeId, text: &str) -> VisitResult {
            self.0.push(format!("text {text}"));
            if text == "stop" {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }

        fn visit_break(&mut self, _doc: &Document, _id: NodeId) -> VisitResult {
            self.0.push("break".to_string());
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn walks_depth_first_in_order() {
        let mut doc = Document::new();
        let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
        doc.append_text(para, NodeKind::Str, "a");
        doc.append_leaf(para, NodeKind::Break);
        let strong = doc.append_parent(para, NodeKind::Strong);
        doc.append_text(strong, NodeKind::Str, "b");

        let mut trace = Trace::default();
        let result = walk_node(&mut trace, &doc, doc.root());

        assert!(result.is_continue());
        assert_eq!(
            trace.0,
            vec![
                "enter Document",
                "enter Paragraph",
                "enter Str",
                "text a",
                "exit Str",
                "enter Break",
                "break",
                "exit Break",
                "enter Strong",
                "enter Str",
                "text b",
                "exit Str",
                "exit Strong",
                "exit Paragraph",
                "exit Document",
            ]
        );
    }

    #[test]
    fn break_stops_traversal() {
        let mut doc = Document::new();
        doc.append_text(doc.root(), NodeKind::Str, "stop");
        doc.append_text(doc.root(), NodeKind::Str, "never");

        let mut trace = Trace::default();
        let result = walk_node(&mut trace, &doc, doc.root());

        assert!(result.is_break());
        assert!(!trace.0.iter().any(|t| t == "text never"));
    }
}
