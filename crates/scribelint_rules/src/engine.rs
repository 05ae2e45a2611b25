//! Ordered evaluation of the rule table.

use std::panic::{AssertUnwindSafe, catch_unwind};

use scribelint_ast::SpanSet;
use scribelint_plugin::{Category, Lint, LintSource};
use tracing::{debug, warn};

use crate::{Rule, RuleSpec, default_rules};

/// Evaluates an ordered list of rules against plain text.
///
/// Rules are stateless, so evaluating the same text twice yields the same
/// lints. Earlier rules win overlapping regions.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Creates an engine over the given rules, in order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Creates an engine over the built-in table.
    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Compiles and appends extra rules after the existing ones.
    ///
    /// Rules that fail to compile are skipped with a warning. Returns the
    /// number of rules added.
    pub fn extend_specs(&mut self, specs: impl IntoIterator<Item = RuleSpec>) -> usize {
        let before = self.rules.len();
        self.rules.extend(compile_all(specs));
        self.rules.len() - before
    }

    /// Enables or disables the rule with `id`. Returns false if no such rule exists.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id() == id) {
            Some(rule) => {
                rule.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    /// Disables every rule in `category`.
    pub fn disable_category(&mut self, category: Category) {
        for rule in self.rules.iter_mut().filter(|r| r.category() == category) {
            rule.set_enabled(false);
        }
    }

    /// Finds every match of every enabled rule that does not overlap
    /// `occupied`, claiming each accepted span before the next candidate is
    /// considered.
    pub fn evaluate(&self, text: &str, occupied: &mut SpanSet) -> Vec<Lint> {
        let mut lints = Vec::new();

        for rule in self.rules.iter().filter(|r| r.is_enabled()) {
            let candidates = match catch_unwind(AssertUnwindSafe(|| rule.candidates(text))) {
                Ok(candidates) => candidates,
                Err(_) => {
                    warn!(rule = rule.id(), "MalformedRule: template panicked, rule skipped");
                    continue;
                }
            };

            for candidate in candidates {
                if !occupied.claim(candidate.span) {
                    continue;
                }
                let Some(lint) = Lint::from_text(
                    text,
                    candidate.span,
                    candidate.message,
                    rule.kind(),
                    LintSource::Pattern,
                ) else {
                    continue;
                };
                lints.push(
                    lint.with_category(rule.category())
                        .with_suggestions(candidate.suggestions)
                        .with_rule_id(rule.id()),
                );
            }
        }

        debug!(count = lints.len(), "pattern rules evaluated");
        lints
    }
}

/// Compiles specs in order, skipping the ones that fail.
pub(crate) fn compile_all(specs: impl IntoIterator<Item = RuleSpec>) -> Vec<Rule> {
    specs
        .into_iter()
        .filter_map(|spec| match spec.compile() {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(rule = e.rule_id(), error = %e, "MalformedRule: rule skipped");
                None
            }
        })
        .collect()
}
