//! Parser trait definition.

use scribelint_ast::Document;

use crate::{MarkdownParser, ParseError, PlainTextParser};

/// Trait for parsing source text into a [`Document`].
///
/// # Example
///
/// ```rust
/// use scribelint_ast::{Document, NodeKind};
/// use scribelint_parser::{ParseError, Parser};
///
/// struct LineParser;
///
/// impl Parser for LineParser {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["lines"]
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, ParseError> {
///         let mut doc = Document::new();
///         for line in source.lines() {
///             let para = doc.append_parent(doc.root(), NodeKind::Paragraph);
///             doc.append_text(para, NodeKind::Str, line);
///         }
///         Ok(doc)
///     }
/// }
///
/// assert!(LineParser.can_parse("LINES"));
/// ```
pub trait Parser: Send + Sync {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a document tree.
    fn parse(&self, source: &str) -> Result<Document, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Returns the built-in parser for a file extension.
pub fn parser_for_extension(extension: &str) -> Result<Box<dyn Parser>, ParseError> {
    let markdown = MarkdownParser::new();
    if markdown.can_parse(extension) {
        return Ok(Box::new(markdown));
    }
    let text = PlainTextParser::new();
    if text.can_parse(extension) {
        return Ok(Box::new(text));
    }
    Err(ParseError::unsupported(extension))
}
