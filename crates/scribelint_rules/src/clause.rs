//! Run-on and imperative clause junction detection.

use scribelint_ast::{Span, SpanSet};
use scribelint_plugin::{Lint, LintKind, LintSource, Suggestion};
use scribelint_text::{Token, Tokenizer, capitalize};
use tracing::trace;

use crate::words;

const RUN_ON_MESSAGE: &str =
    "Possible run-on sentence: two independent clauses are joined without punctuation.";
const IMPERATIVE_MESSAGE: &str = "Possible missing punctuation before an imperative clause.";

/// Which junction a candidate window represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    /// `<word> <subject> <finite verb>`
    Independent,
    /// `<clause ending> <imperative verb> <object>`
    Imperative,
}

/// Flags places where a new clause starts without punctuation.
///
/// Works on three-word windows of consecutive words separated only by spaces
/// or tabs. A line break between words is already a boundary and never
/// produces a candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseBoundaryDetector;

impl ClauseBoundaryDetector {
    pub fn new() -> Self {
        Self
    }

    /// Runs both scans over `text`, claiming every accepted span in `occupied`.
    pub fn detect(&self, text: &str, occupied: &mut SpanSet) -> Vec<Lint> {
        let tokens = Tokenizer::tokenize(text);
        let mut lints = scan(text, &tokens, Junction::Independent, occupied);
        lints.extend(scan(text, &tokens, Junction::Imperative, occupied));
        lints
    }
}

fn scan(text: &str, tokens: &[Token<'_>], junction: Junction, occupied: &mut SpanSet) -> Vec<Lint> {
    let mut lints = Vec::new();
    let mut i = 0;

    while i + 2 < tokens.len() {
        let window = [&tokens[i], &tokens[i + 1], &tokens[i + 2]];
        let span = Span::from_range(window[0].span.start..window[2].span.end);

        let accepted = is_candidate(text, window, junction)
            && !occupied.overlaps_span(span)
            && occupied.insert_span(span);

        if !accepted {
            // Resume at the subject word so chained junctions are still seen.
            i += 1;
            continue;
        }

        trace!(?junction, start = span.start, end = span.end, "clause junction");
        if let Some(lint) = build_lint(text, span, window, junction) {
            lints.push(lint);
        }
        i += 3;
    }

    lints
}

fn is_candidate(text: &str, window: [&Token<'_>; 3], junction: Junction) -> bool {
    let [first, second, third] = window;

    if !spaced(text, first, second) || !spaced(text, second, third) {
        return false;
    }
    if !continues_clause(text, first.span.start) {
        return false;
    }
    if words::is_connector(first.surface) {
        return false;
    }

    match junction {
        Junction::Independent => {
            if words::is_subject_pronoun(second.surface) {
                words::is_finite_verb(third.surface)
            } else if words::is_negative_contraction(second.surface) {
                words::is_clause_ending(first.surface) && words::is_finite_verb(third.surface)
            } else {
                false
            }
        }
        Junction::Imperative => {
            words::is_clause_ending(first.surface)
                && words::is_imperative_verb(second.surface)
                && words::is_object_opener(third.surface)
        }
    }
}

/// True if only spaces or tabs separate the two tokens.
fn spaced(text: &str, left: &Token<'_>, right: &Token<'_>) -> bool {
    let gap = &text[left.span.end..right.span.start];
    !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t')
}

/// True if a word of the same line comes before `start` with no punctuation
/// in between.
///
/// A window right after the start of the text, a line break or a punctuation
/// mark opens a new clause.
fn continues_clause(text: &str, start: usize) -> bool {
    text[..start]
        .trim_end_matches([' ', '\t'])
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric)
}

fn build_lint(text: &str, span: Span, window: [&Token<'_>; 3], junction: Junction) -> Option<Lint> {
    let [first, second, third] = window;
    let head = first.surface;
    let tail = &text[second.span.start..third.span.end];

    let comma = Suggestion::replace(format!("{head}, {tail}"));
    let split = Suggestion::replace(format!("{head}. {}", capitalize(tail)));

    let (message, suggestions) = match junction {
        Junction::Independent => (
            RUN_ON_MESSAGE,
            vec![comma, Suggestion::replace(format!("{head}; {tail}")), split],
        ),
        Junction::Imperative => (IMPERATIVE_MESSAGE, vec![comma, split]),
    };

    Lint::from_text(text, span, message, LintKind::Punctuation, LintSource::Clause)
        .map(|lint| lint.with_suggestions(suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn detect(text: &str) -> Vec<Lint> {
        ClauseBoundaryDetector::new().detect(text, &mut SpanSet::new())
    }

    fn apply_first(text: &str, lint: &Lint) -> String {
        let range = lint.span.range();
        format!(
            "{}{}{}",
            &text[..range.start],
            lint.suggestions[0].text,
            &text[range.end..]
        )
    }

    #[test]
    fn imperative_junction() {
        let text = "a day keep an eye";
        let lints = detect(text);

        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].problem_text, "day keep an");
        assert_eq!(lints[0].source, LintSource::Clause);
        assert_eq!(lints[0].kind, LintKind::Punctuation);
        assert_eq!(apply_first(text, &lints[0]), "a day, keep an eye");
        assert_eq!(lints[0].suggestions[1].text, "day. Keep an");
        assert_eq!(lints[0].suggestions.len(), 2);
    }

    #[test]
    fn independent_junction_suggestions() {
        let text = "I went home they ate dinner";
        let lints = detect(text);

        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].problem_text, "home they ate");
        let texts: Vec<&str> = lints[0].suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["home, they ate", "home; they ate", "home. They ate"]
        );
    }

    #[test]
    fn negative_contraction_after_clause_ending() {
        let lints = detect("see you tomorrow don't forget it");
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].problem_text, "tomorrow don't forget");
    }

    #[rstest]
    #[case::subordinator("it rained because they said so")]
    #[case::reporting_verb("he said they were late")]
    #[case::comma_already("we went home, they ate")]
    #[case::line_break("we went home\nthey ate")]
    #[case::ordinary_noun_before_contraction("most people don't know it")]
    #[case::no_object("a day keep going")]
    #[case::after_full_stop("We left early. Tomorrow we go home.")]
    #[case::after_exclamation("It was late! Today I went home")]
    #[case::after_question_mark("Are you sure?  Today I went home")]
    #[case::start_of_text("Sometimes I think so.")]
    #[case::start_of_line("We left early\nTomorrow we go home")]
    fn no_junction(#[case] text: &str) {
        assert!(detect(text).is_empty(), "unexpected lint in {text:?}");
    }

    #[test]
    fn punctuation_before_the_window_rejects() {
        assert!(detect("(home they ate").is_empty());
        assert!(detect("\u{201C}home they ate").is_empty());
    }

    #[test]
    fn rejected_window_resumes_at_subject() {
        // "because home I" is rejected, the scan must still find "home I went".
        let lints = detect("because home I went there");
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].problem_text, "home I went");
    }

    #[test]
    fn chained_junctions() {
        let lints = detect("it was late today we left tonight they slept");
        let found: Vec<&str> = lints.iter().map(|l| l.problem_text.as_str()).collect();
        assert_eq!(found, vec!["today we left", "tonight they slept"]);
    }

    #[test]
    fn occupied_regions_are_skipped() {
        let text = "a day keep an eye";
        let mut occupied = SpanSet::new();
        occupied.insert(6, 10);
        let lints = ClauseBoundaryDetector::new().detect(text, &mut occupied);
        assert!(lints.is_empty());
    }

    #[test]
    fn accepted_spans_are_claimed() {
        let mut occupied = SpanSet::new();
        let lints = ClauseBoundaryDetector::new().detect("a day keep an eye", &mut occupied);
        assert_eq!(lints.len(), 1);
        assert!(occupied.overlaps_span(lints[0].span));
    }
}
