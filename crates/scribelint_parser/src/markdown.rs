//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! This parser converts the mdast produced by the `markdown` crate into a
//! scribelint [`Document`].

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};
use scribelint_ast::{Document, NodeId, NodeKind, Span};

use crate::{ParseError, Parser};

/// Markdown parser implementation (CommonMark + GFM).
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    /// Gets default parse options (GFM).
    fn default_options() -> ParseOptions {
        ParseOptions::gfm()
    }

    /// Converts the children of an mdast node under `parent`.
    fn convert_children(&self, doc: &mut Document, parent: NodeId, node: &Node, source: &str) {
        if let Some(children) = node.children() {
            for child in children {
                self.convert_node(doc, parent, child, source);
            }
        }
    }

    /// Converts one mdast node and its subtree.
    fn convert_node(&self, doc: &mut Document, parent: NodeId, node: &Node, source: &str) {
        match node {
            Node::Root(_) => self.convert_children(doc, parent, node, source),

            Node::Paragraph(_) => self.parent(doc, parent, node, source, NodeKind::Paragraph),
            Node::Heading(heading) => {
                self.parent(doc, parent, node, source, NodeKind::Header(heading.depth))
            }
            Node::Blockquote(_) => self.parent(doc, parent, node, source, NodeKind::BlockQuote),
            Node::List(_) => self.parent(doc, parent, node, source, NodeKind::List),
            Node::ListItem(_) => self.parent(doc, parent, node, source, NodeKind::ListItem),
            Node::Table(_) => self.parent(doc, parent, node, source, NodeKind::Table),
            Node::TableRow(_) => self.parent(doc, parent, node, source, NodeKind::TableRow),
            Node::TableCell(_) => self.parent(doc, parent, node, source, NodeKind::TableCell),
            Node::Emphasis(_) => self.parent(doc, parent, node, source, NodeKind::Emphasis),
            Node::Strong(_) => self.parent(doc, parent, node, source, NodeKind::Strong),
            Node::Delete(_) => self.parent(doc, parent, node, source, NodeKind::Delete),
            Node::Link(_) | Node::LinkReference(_) => {
                self.parent(doc, parent, node, source, NodeKind::Link)
            }
            Node::FootnoteDefinition(_) => self.parent(
                doc,
                parent,
                node,
                source,
                NodeKind::Custom("footnoteDefinition".to_string()),
            ),

            Node::Text(text) => {
                let id = doc.append_text(parent, NodeKind::Str, text.value.as_str());
                if let Some(span) = exact_span(node, &text.value, source) {
                    doc.set_source(id, span);
                }
            }
            Node::InlineCode(code) => {
                let id = doc.append_text(parent, NodeKind::Code, code.value.as_str());
                if let Some(span) = inner_span(node, &code.value, source) {
                    doc.set_source(id, span);
                }
            }
            Node::Code(code) => {
                let id = doc.append_text(parent, NodeKind::CodeBlock, code.value.as_str());
                if let Some(span) = inner_span(node, &code.value, source) {
                    doc.set_source(id, span);
                }
            }

            Node::Break(_) => {
                doc.append_leaf(parent, NodeKind::Break);
            }
            Node::ThematicBreak(_) => {
                doc.append_leaf(parent, NodeKind::HorizontalRule);
            }
            Node::Html(_) => {
                doc.append_leaf(parent, NodeKind::Html);
            }
            Node::Image(_) | Node::ImageReference(_) => {
                doc.append_leaf(parent, NodeKind::Image);
            }
            Node::FootnoteReference(_) => {
                doc.append_leaf(parent, NodeKind::FootnoteReference);
            }
            Node::Definition(_) => {
                doc.append_leaf(parent, NodeKind::Custom("definition".to_string()));
            }
            Node::Yaml(_) | Node::Toml(_) => {
                doc.append_leaf(parent, NodeKind::Custom("frontmatter".to_string()));
            }
            Node::Math(_) | Node::InlineMath(_) => {
                doc.append_leaf(parent, NodeKind::Custom("math".to_string()));
            }

            // MDX and anything newer are opaque components.
            _ => {
                let id = doc.append_parent(parent, NodeKind::Custom("component".to_string()));
                self.convert_children(doc, id, node, source);
            }
        }
    }

    fn parent(
        &self,
        doc: &mut Document,
        parent: NodeId,
        node: &Node,
        source: &str,
        kind: NodeKind,
    ) {
        let id = doc.append_parent(parent, kind);
        self.convert_children(doc, id, node, source);
    }
}

/// The node's source range, if `value` is exactly that range.
fn exact_span(node: &Node, value: &str, source: &str) -> Option<Span> {
    let pos = node.position()?;
    let range = pos.start.offset..pos.end.offset;
    (source.get(range.clone())? == value && !value.is_empty()).then(|| Span::from_range(range))
}

/// The first occurrence of `value` inside the node's source range, used for
/// code whose value excludes the fences or backticks around it.
fn inner_span(node: &Node, value: &str, source: &str) -> Option<Span> {
    if value.is_empty() {
        return None;
    }
    let pos = node.position()?;
    let outer = source.get(pos.start.offset..pos.end.offset)?;
    let start = pos.start.offset + outer.find(value)?;
    Some(Span::from_range(start..start + value.len()))
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let options = Self::default_options();
        let mdast =
            to_mdast(source, &options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let mut doc = Document::new();
        let root = doc.root();
        self.convert_node(&mut doc, root, &mdast, source);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Document {
        MarkdownParser::new().parse(source).unwrap()
    }

    fn kinds(doc: &Document, id: NodeId) -> Vec<NodeKind> {
        doc.children(id).iter().map(|c| doc.kind(*c).clone()).collect()
    }

    #[test]
    fn test_parse_heading_and_paragraph() {
        let doc = parse("# Level 1\n\n## Level 2\n\nBody text.");
        assert_eq!(
            kinds(&doc, doc.root()),
            vec![NodeKind::Header(1), NodeKind::Header(2), NodeKind::Paragraph]
        );
    }

    #[test]
    fn test_text_has_source_span() {
        let source = "Hello *world*";
        let doc = parse(source);
        let para = doc.children(doc.root())[0];
        let hello = doc.children(para)[0];

        assert_eq!(doc.text(hello), Some("Hello "));
        assert_eq!(doc.node(hello).source, Some(Span::new(0, 6)));
    }

    #[test]
    fn test_escaped_text_has_no_source_span() {
        let doc = parse(r"a \* b");
        let para = doc.children(doc.root())[0];
        for child in doc.children(para) {
            if let Some(span) = doc.node(*child).source {
                assert_eq!(
                    &r"a \* b"[span.range()],
                    doc.text(*child).unwrap_or_default()
                );
            }
        }
    }

    #[test]
    fn test_parse_inline_code() {
        let source = "Use `code` here";
        let doc = parse(source);
        let para = doc.children(doc.root())[0];

        assert_eq!(
            kinds(&doc, para),
            vec![NodeKind::Str, NodeKind::Code, NodeKind::Str]
        );
        let code = doc.children(para)[1];
        assert_eq!(doc.node(code).source, Some(Span::new(5, 9)));
    }

    #[test]
    fn test_parse_code_block() {
        let source = "```rust\nfn main() {}\n```";
        let doc = parse(source);
        let block = doc.children(doc.root())[0];

        assert_eq!(doc.kind(block), &NodeKind::CodeBlock);
        assert_eq!(doc.text(block), Some("fn main() {}"));
        let span = doc.node(block).source.unwrap();
        assert_eq!(&source[span.range()], "fn main() {}");
    }

    #[test]
    fn test_parse_list_and_quote() {
        let doc = parse("- Item 1\n- Item 2\n\n> quoted");
        let top = kinds(&doc, doc.root());
        assert_eq!(top, vec![NodeKind::List, NodeKind::BlockQuote]);

        let list = doc.children(doc.root())[0];
        assert_eq!(kinds(&doc, list), vec![NodeKind::ListItem, NodeKind::ListItem]);
    }

    #[test]
    fn test_parse_table() {
        let doc = parse("| A | B |\n|---|---|\n| 1 | 2 |");
        let table = doc.children(doc.root())[0];
        assert_eq!(doc.kind(table), &NodeKind::Table);
        assert_eq!(kinds(&doc, table), vec![NodeKind::TableRow, NodeKind::TableRow]);
    }

    #[test]
    fn test_parse_break_and_leaves() {
        let doc = parse("line one  \nline two\n\n---\n\n![alt](a.png)");
        let para = doc.children(doc.root())[0];
        assert!(kinds(&doc, para).contains(&NodeKind::Break));
        assert_eq!(doc.kind(doc.children(doc.root())[1]), &NodeKind::HorizontalRule);
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse("");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_extensions() {
        let parser = MarkdownParser::new();

        assert!(parser.can_parse("md"));
        assert!(parser.can_parse("markdown"));
        assert!(parser.can_parse("MD"));
        assert!(!parser.can_parse("txt"));
        assert_eq!(parser.name(), "markdown");
    }
}
