//! Plain text parser.

use scribelint_ast::{Document, NodeId, NodeKind, Span};

use crate::{ParseError, Parser};

/// Plain text parser.
///
/// Blank lines separate paragraphs; a single newline inside a paragraph
/// becomes a forced line break.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for PlainTextParser {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let mut doc = Document::new();
        let root = doc.root();
        let mut paragraph: Option<NodeId> = None;
        let mut offset = 0;

        for line in source.split_inclusive('\n') {
            let start = offset;
            offset += line.len();

            let content = line.trim_end_matches(['\n', '\r']);
            if content.trim().is_empty() {
                paragraph = None;
                continue;
            }

            let para = match paragraph {
                Some(para) => {
                    doc.append_leaf(para, NodeKind::Break);
                    para
                }
                None => {
                    let para = doc.append_parent(root, NodeKind::Paragraph);
                    paragraph = Some(para);
                    para
                }
            };

            let text = doc.append_text(para, NodeKind::Str, content);
            doc.set_source(text, Span::from_range(start..start + content.len()));
        }

        Ok(doc)
    }
}
