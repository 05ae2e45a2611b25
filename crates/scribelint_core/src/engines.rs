//! Built-in grammar engine.

use scribelint_ast::Span;
use scribelint_plugin::{GrammarEngine, Lint, LintKind, LintSource, PluginError, Suggestion};
use scribelint_text::{Tokenizer, match_case};

use crate::Dictionary;

/// A [`GrammarEngine`] that flags words found in the misspelling dictionary.
///
/// Stands in for a real spell checker when the host has none.
#[derive(Debug, Clone, Default)]
pub struct DictionaryEngine {
    dictionary: Dictionary,
}

impl DictionaryEngine {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// Synchronous form of [`GrammarEngine::lint`].
    pub fn check(&self, text: &str) -> Vec<Lint> {
        Tokenizer::tokenize(text)
            .into_iter()
            .filter_map(|token| {
                let correction = self.dictionary.lookup(token.surface)?;
                let suggestion = match_case(correction, token.surface);
                Some(
                    Lint::new(
                        Span::from_range(token.span),
                        token.surface,
                        format!("Possible spelling mistake: did you mean \"{suggestion}\"?"),
                        LintKind::Spelling,
                        LintSource::Engine,
                    )
                    .with_suggestion(Suggestion::replace(suggestion)),
                )
            })
            .collect()
    }
}

impl GrammarEngine for DictionaryEngine {
    fn name(&self) -> &str {
        "dictionary"
    }

    async fn lint(&self, text: &str) -> Result<Vec<Lint>, PluginError> {
        Ok(self.check(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_known_misspellings() {
        let engine = DictionaryEngine::default();
        let text = "I recieve Writting tips";
        let lints = engine.check(text);

        assert_eq!(lints.len(), 2);
        assert_eq!(lints[0].problem_text, "recieve");
        assert_eq!(lints[0].suggestions[0].text, "receive");
        assert_eq!(lints[1].suggestions[0].text, "Writing");
        assert!(lints.iter().all(|l| l.is_consistent_with(text)));
    }

    #[tokio::test]
    async fn async_lint_matches_check() {
        let engine = DictionaryEngine::default();
        let lints = engine.lint("untill then").await.unwrap();
        assert_eq!(lints, engine.check("untill then"));
        assert_eq!(engine.name(), "dictionary");
    }
}
