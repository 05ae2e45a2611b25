//! Node kinds for the document tree.

use serde::{Deserialize, Serialize};

/// The kind of a document node.
///
/// The named kinds follow the mdast/TxtAST vocabulary. Anything a host
/// document contains that scribelint does not know about is carried as
/// [`NodeKind::Custom`] and treated as a block boundary when flattening.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NodeKind {
    // Document structure
    /// Root document node.
    Document,

    // Block elements
    /// Paragraph containing inline content.
    Paragraph,
    /// Heading with its depth (1-6).
    Header(u8),
    /// Block quote.
    BlockQuote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Fenced or indented code block (text leaf, never linted).
    CodeBlock,
    /// Horizontal rule / thematic break.
    HorizontalRule,
    /// Raw HTML.
    Html,
    /// Table (GFM).
    Table,
    /// Table row (GFM).
    TableRow,
    /// Table cell (GFM).
    TableCell,

    // Inline elements
    /// Plain text string.
    Str,
    /// Forced line break.
    Break,
    /// Emphasis (italic).
    Emphasis,
    /// Strong emphasis (bold).
    Strong,
    /// Strikethrough text.
    Delete,
    /// Inline code (text leaf, never linted).
    Code,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Footnote reference.
    FootnoteReference,

    /// Opaque component of unknown rendering, identified by its tag name.
    Custom(String),
}

impl NodeKind {
    /// Returns true if this kind renders inline with its neighbours.
    ///
    /// This is an allow-list: every kind not listed here, including all
    /// `Custom` kinds, separates its content from the surrounding text.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Str
                | NodeKind::Break
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Delete
                | NodeKind::Code
                | NodeKind::Link
                | NodeKind::Image
                | NodeKind::FootnoteReference
        )
    }

    /// Returns true if nodes of this kind carry text that appears in the
    /// flattened document.
    #[inline]
    pub fn is_text_bearing(&self) -> bool {
        matches!(self, NodeKind::Str | NodeKind::Code | NodeKind::CodeBlock)
    }

    /// Returns true if the text of this kind must never be linted.
    #[inline]
    pub fn is_code(&self) -> bool {
        matches!(self, NodeKind::Code | NodeKind::CodeBlock)
    }

    /// Returns a short, stable name for diagnostics and debug output.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Header(_) => "Header",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::List => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::CodeBlock => "CodeBlock",
            NodeKind::HorizontalRule => "HorizontalRule",
            NodeKind::Html => "Html",
            NodeKind::Table => "Table",
            NodeKind::TableRow => "TableRow",
            NodeKind::TableCell => "TableCell",
            NodeKind::Str => "Str",
            NodeKind::Break => "Break",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Strong => "Strong",
            NodeKind::Delete => "Delete",
            NodeKind::Code => "Code",
            NodeKind::Link => "Link",
            NodeKind::Image => "Image",
            NodeKind::FootnoteReference => "FootnoteReference",
            NodeKind::Custom(tag) => tag,
        }
    }
}
