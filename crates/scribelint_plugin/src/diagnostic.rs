//! Lint records produced by every stage of a pass.

use serde::{Deserialize, Serialize};
use scribelint_ast::Span;

/// What kind of problem a lint describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LintKind {
    Spelling,
    Grammar,
    Punctuation,
    Style,
    Agreement,
    Capitalization,
    Repetition,
    WordChoice,
    Redundancy,
}

impl LintKind {
    /// The category a lint of this kind falls into unless a rule says otherwise.
    pub const fn default_category(self) -> Category {
        match self {
            LintKind::Spelling => Category::Spelling,
            LintKind::Style | LintKind::Redundancy | LintKind::WordChoice => Category::Style,
            LintKind::Grammar
            | LintKind::Punctuation
            | LintKind::Agreement
            | LintKind::Capitalization
            | LintKind::Repetition => Category::Grammar,
        }
    }
}

/// Coarse grouping used for user-facing toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spelling,
    Grammar,
    Style,
}

/// Which stage produced a lint.
///
/// The declaration order is the tie-break priority when two lints start at
/// the same offset: engine output wins over pattern rules, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSource {
    Engine,
    Pattern,
    Clause,
    Ai,
}

/// How a suggestion changes the flagged span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionKind {
    ReplaceWith,
    Remove,
}

/// A candidate fix for a lint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// Replacement text. Empty means delete the span.
    pub text: String,
    /// Replacement or removal.
    pub kind: SuggestionKind,
}

impl Suggestion {
    /// Creates a replacement. An empty replacement becomes a removal.
    pub fn replace(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text.is_empty() {
            SuggestionKind::Remove
        } else {
            SuggestionKind::ReplaceWith
        };
        Self { text, kind }
    }

    /// Creates a removal.
    pub fn remove() -> Self {
        Self {
            text: String::new(),
            kind: SuggestionKind::Remove,
        }
    }
}

/// A flagged issue in one text snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lint {
    /// Byte span in the snapshot.
    pub span: Span,

    /// Human-readable explanation.
    pub message: String,

    /// Kind of problem.
    pub kind: LintKind,

    /// Category used for toggles.
    pub category: Category,

    /// `text[span]` captured when the lint was created.
    pub problem_text: String,

    /// Candidate fixes, best first.
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,

    /// Producing stage.
    pub source: LintSource,

    /// Identifier of the pattern rule that produced this lint, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl Lint {
    /// Creates a lint whose `problem_text` is already known.
    pub fn new(
        span: Span,
        problem_text: impl Into<String>,
        message: impl Into<String>,
        kind: LintKind,
        source: LintSource,
    ) -> Self {
        Self {
            span,
            message: message.into(),
            kind,
            category: kind.default_category(),
            problem_text: problem_text.into(),
            suggestions: Vec::new(),
            source,
            rule_id: None,
        }
    }

    /// Creates a lint by slicing `text`, or `None` if `span` is not valid for it.
    pub fn from_text(
        text: &str,
        span: Span,
        message: impl Into<String>,
        kind: LintKind,
        source: LintSource,
    ) -> Option<Self> {
        let problem = span.slice(text)?;
        Some(Self::new(span, problem, message, kind, source))
    }

    /// Overrides the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Appends a suggestion.
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Replaces all suggestions.
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Records the producing rule.
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Returns true if the span is valid for `text` and still covers `problem_text`.
    pub fn is_consistent_with(&self, text: &str) -> bool {
        self.span.slice(text) == Some(self.problem_text.as_str())
    }

    /// Builds the fix for the suggestion at `index`.
    pub fn fix(&self, index: usize) -> Option<Fix> {
        let suggestion = self.suggestions.get(index)?;
        Some(Fix::new(self.span, suggestion.text.clone()).with_original(self.problem_text.clone()))
    }
}

/// A concrete replacement of one span, ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fix {
    /// The byte span to replace.
    pub span: Span,

    /// The replacement text.
    pub text: String,

    /// The text the span covered when the fix was computed, used to relocate
    /// the fix after the document drifted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original: String,
}

impl Fix {
    /// Creates a new fix.
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
            original: String::new(),
        }
    }

    /// Creates a fix that deletes a span.
    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }

    /// Records the text the span is expected to cover.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }
}
