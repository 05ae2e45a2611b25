//! # scribelint_parser
//!
//! Turns source files into editable [`Document`](scribelint_ast::Document) trees.
//!
//! This crate provides:
//! - A `Parser` trait for implementing custom parsers
//! - Built-in Markdown parser using `markdown-rs`
//! - Built-in plain text parser
//!
//! Text leaves remember their byte span in the source whenever their value is
//! a verbatim copy of it, which is what allows edits to be written back.
//!
//! ## Example
//!
//! ```rust
//! use scribelint_parser::{MarkdownParser, Parser};
//!
//! let parser = MarkdownParser::new();
//! let doc = parser.parse("# Hello\n\nThis is a paragraph.").unwrap();
//! assert_eq!(doc.children(doc.root()).len(), 2);
//! ```

mod error;
mod markdown;
mod text;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use text::PlainTextParser;
pub use traits::{Parser, parser_for_extension};
