use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// A word token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    /// The surface form of the token (the text itself).
    pub surface: &'t str,
    /// Byte range in the original text.
    pub span: Range<usize>,
}

/// Splits text into words on Unicode word boundaries (UAX #29).
///
/// Apostrophes inside a word stay part of it, so `don't` is one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Returns the word tokens of `text`, skipping whitespace and punctuation.
    pub fn tokenize(text: &str) -> Vec<Token<'_>> {
        text.unicode_word_indices()
            .map(|(start, surface)| Token {
                surface,
                span: start..start + surface.len(),
            })
            .collect()
    }

    /// Counts the word tokens of `text`.
    pub fn word_count(text: &str) -> usize {
        text.unicode_words().count()
    }

    /// Returns true if `text` is exactly one word with nothing around it.
    pub fn is_single_word(text: &str) -> bool {
        let mut words = text.unicode_word_indices();
        match (words.next(), words.next()) {
            (Some((0, word)), None) => word.len() == text.len(),
            _ => false,
        }
    }

    /// Returns the start of the word that ends right before `offset`,
    /// skipping whitespace in between.
    pub fn previous_word(text: &str, offset: usize) -> Option<Token<'_>> {
        let head = text.get(..offset)?;
        let (start, surface) = head.unicode_word_indices().next_back()?;
        if !head[start + surface.len()..].chars().all(char::is_whitespace) {
            return None;
        }
        Some(Token {
            surface,
            span: start..start + surface.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn tokenize_keeps_contractions() {
        let tokens = Tokenizer::tokenize("he don't, like it");
        let words: Vec<&str> = tokens.iter().map(|t| t.surface).collect();
        assert_eq!(words, vec!["he", "don't", "like", "it"]);
        assert_eq!(tokens[1].span, 3..8);
    }

    #[test]
    fn tokenize_reports_byte_spans() {
        let tokens = Tokenizer::tokenize("café au lait");
        assert_eq!(tokens[0].span, 0..5);
        assert_eq!(tokens[1].span, 6..8);
    }

    #[rstest]
    #[case("writting", true)]
    #[case("don't", true)]
    #[case("writ ting", false)]
    #[case(" word", false)]
    #[case("word.", false)]
    #[case("", false)]
    fn single_word(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(Tokenizer::is_single_word(text), expected);
    }

    #[test]
    fn previous_word_skips_whitespace_only() {
        let text = "a day keep";
        let prev = Tokenizer::previous_word(text, 6).unwrap();
        assert_eq!(prev.surface, "day");
        assert_eq!(prev.span, 2..5);

        assert!(Tokenizer::previous_word("end. keep", 5).is_none());
        assert!(Tokenizer::previous_word("keep", 0).is_none());
    }

    #[test]
    fn word_count() {
        assert_eq!(Tokenizer::word_count("one, two  three!"), 3);
    }
}
