//! Rule definitions.

use regex::{Captures, Regex, RegexBuilder};
use scribelint_ast::Span;
use scribelint_plugin::{Category, LintKind, Suggestion};
use serde::{Deserialize, Serialize};

use crate::RuleError;

/// A message or suggestion generator computed from the captures of a match.
///
/// Returning `None` declines the match.
pub type ComputeFn = fn(&Captures<'_>) -> Option<String>;

/// How a rule turns a match into text.
#[derive(Clone)]
pub enum Template {
    /// Text with `$1` / `${name}` capture references.
    Literal(String),
    /// A pure function of the captures.
    Computed(ComputeFn),
}

impl Template {
    /// Creates a literal template.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Renders the template for one match.
    pub fn render(&self, caps: &Captures<'_>) -> Option<String> {
        match self {
            Template::Literal(template) => {
                let mut out = String::new();
                caps.expand(template, &mut out);
                Some(out)
            }
            Template::Computed(compute) => compute(caps),
        }
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Template::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// An uncompiled rule.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub id: String,
    pub pattern: String,
    pub capture: usize,
    pub message: Template,
    pub suggest: Vec<Template>,
    pub kind: LintKind,
    pub category: Option<Category>,
    pub enabled: bool,
}

impl RuleSpec {
    /// Creates an enabled rule that flags the whole match.
    pub fn new(
        id: impl Into<String>,
        pattern: impl Into<String>,
        kind: LintKind,
        message: Template,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            capture: 0,
            message,
            suggest: Vec::new(),
            kind,
            category: None,
            enabled: true,
        }
    }

    /// Flags capture group `index` instead of the whole match.
    pub fn capture(mut self, index: usize) -> Self {
        self.capture = index;
        self
    }

    /// Appends a suggestion template.
    pub fn suggest(mut self, template: Template) -> Self {
        self.suggest.push(template);
        self
    }

    /// Overrides the category derived from the kind.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Marks the rule as disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Compiles the pattern (case-insensitive).
    pub fn compile(self) -> Result<Rule, RuleError> {
        let pattern = RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                id: self.id.clone(),
                source,
            })?;

        let groups = pattern.captures_len();
        if self.capture >= groups {
            return Err(RuleError::CaptureOutOfRange {
                id: self.id,
                capture: self.capture,
                groups: groups - 1,
            });
        }

        Ok(Rule {
            category: self.category.unwrap_or(self.kind.default_category()),
            id: self.id,
            pattern,
            capture: self.capture,
            message: self.message,
            suggest: self.suggest,
            kind: self.kind,
            enabled: self.enabled,
        })
    }
}

/// Serialized form of a rule, used for rules supplied through configuration.
///
/// Templates are always literal here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub id: String,
    pub pattern: String,
    #[serde(default)]
    pub capture: usize,
    pub message: String,
    #[serde(default)]
    pub suggest: Vec<String>,
    pub kind: LintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl From<RuleDescriptor> for RuleSpec {
    fn from(desc: RuleDescriptor) -> Self {
        Self {
            id: desc.id,
            pattern: desc.pattern,
            capture: desc.capture,
            message: Template::Literal(desc.message),
            suggest: desc.suggest.into_iter().map(Template::Literal).collect(),
            kind: desc.kind,
            category: desc.category,
            enabled: desc.enabled,
        }
    }
}

/// A compiled, stateless pattern rule.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    pattern: Regex,
    capture: usize,
    message: Template,
    suggest: Vec<Template>,
    kind: LintKind,
    category: Category,
    enabled: bool,
}

/// One match of a rule, before it is checked against claimed spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub span: Span,
    pub message: String,
    pub suggestions: Vec<Suggestion>,
}

impl Rule {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn kind(&self) -> LintKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Scans `text` from the start and renders every match.
    ///
    /// Matches whose templates decline are left out.
    pub(crate) fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut out = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let Some(span) = self.flagged_span(&caps) else {
                continue;
            };
            let Some(message) = self.message.render(&caps) else {
                continue;
            };
            let suggestions: Option<Vec<Suggestion>> = self
                .suggest
                .iter()
                .map(|t| t.render(&caps).map(Suggestion::replace))
                .collect();
            let Some(suggestions) = suggestions else {
                continue;
            };

            out.push(Candidate {
                span,
                message,
                suggestions,
            });
        }

        out
    }

    /// The whole match, or the requested capture located inside it.
    fn flagged_span(&self, caps: &Captures<'_>) -> Option<Span> {
        let whole = caps.get(0)?;
        if self.capture == 0 {
            return Some(Span::from_range(whole.range()));
        }
        let group = caps.get(self.capture)?;
        let offset = whole.as_str().find(group.as_str())?;
        let start = whole.start() + offset;
        Some(Span::from_range(start..start + group.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(spec: RuleSpec) -> Rule {
        spec.compile().unwrap()
    }

    #[test]
    fn literal_template_expands_captures() {
        let rule = compile(
            RuleSpec::new(
                "dont",
                r"\b(he|she|it)\s+don't\b",
                LintKind::Agreement,
                Template::literal("Use \"doesn't\" with \"${1}\"."),
            )
            .suggest(Template::literal("${1} doesn't")),
        );

        let found = rule.candidates("She don't know");
        assert_eq!(
            found,
            vec![Candidate {
                span: Span::new(0, 9),
                message: "Use \"doesn't\" with \"She\".".to_string(),
                suggestions: vec![Suggestion::replace("She doesn't")],
            }]
        );
    }

    #[test]
    fn capture_span_is_found_inside_the_match() {
        let rule = compile(
            RuleSpec::new(
                "very-unique",
                r"\bvery\s+(unique)\b",
                LintKind::Redundancy,
                Template::literal("Redundant"),
            )
            .capture(1),
        );

        let found = rule.candidates("a very unique idea");
        assert_eq!(found[0].span, Span::new(7, 13));
    }

    #[test]
    fn computed_none_declines_match() {
        fn never(_: &Captures<'_>) -> Option<String> {
            None
        }
        let rule = compile(RuleSpec::new(
            "never",
            r"\bword\b",
            LintKind::Style,
            Template::Computed(never),
        ));
        assert!(rule.candidates("word word").is_empty());
    }

    #[test]
    fn compile_errors() {
        let err = RuleSpec::new("bad", r"(unclosed", LintKind::Style, Template::literal("m"))
            .compile()
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert_eq!(err.rule_id(), "bad");

        let err = RuleSpec::new("cap", r"\b(a)\b", LintKind::Style, Template::literal("m"))
            .capture(2)
            .compile()
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::CaptureOutOfRange {
                capture: 2,
                groups: 1,
                ..
            }
        ));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let rule = compile(RuleSpec::new(
            "alot",
            r"\balot\b",
            LintKind::Spelling,
            Template::literal("m"),
        ));
        assert_eq!(rule.candidates("ALOT of Alot").len(), 2);
        assert_eq!(rule.category(), Category::Spelling);
    }

    #[test]
    fn descriptor_defaults() {
        let desc: RuleDescriptor = serde_json::from_str(
            r#"{"id":"utilize","pattern":"\\butilize\\b","message":"Prefer \"use\".","suggest":["use"],"kind":"WordChoice"}"#,
        )
        .unwrap();
        assert!(desc.enabled);
        assert_eq!(desc.capture, 0);

        let rule = RuleSpec::from(desc).compile().unwrap();
        assert_eq!(rule.id(), "utilize");
        assert_eq!(rule.category(), Category::Style);
        assert_eq!(
            rule.candidates("we utilize it")[0].suggestions,
            vec![Suggestion::replace("use")]
        );
    }
}
