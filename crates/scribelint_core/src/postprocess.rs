//! Clean-up of grammar engine suggestions before merging.

use scribelint_plugin::{Category, Lint, Suggestion};
use scribelint_text::{Tokenizer, match_case};
use tracing::debug;

use crate::Dictionary;

/// Minimum length of each piece of an accepted word split.
const MIN_SPLIT_PIECE: usize = 3;

/// Post-processes every engine lint.
pub fn postprocess(lints: Vec<Lint>, dictionary: &Dictionary) -> Vec<Lint> {
    lints
        .into_iter()
        .map(|lint| postprocess_lint(lint, dictionary))
        .collect()
}

/// Post-processes one engine lint.
///
/// A known misspelling gets exactly its canonical correction. Otherwise
/// implausible word splits are dropped from single-word problems, and a
/// spelling lint left with nothing gets one doubled-letter repair.
pub fn postprocess_lint(mut lint: Lint, dictionary: &Dictionary) -> Lint {
    if let Some(correction) = dictionary.lookup(&lint.problem_text) {
        lint.suggestions = vec![Suggestion::replace(match_case(
            correction,
            &lint.problem_text,
        ))];
        return lint;
    }

    if !Tokenizer::is_single_word(&lint.problem_text) {
        return lint;
    }

    let before = lint.suggestions.len();
    let problem = lint.problem_text.clone();
    lint.suggestions
        .retain(|s| !introduces_space(&problem, &s.text) || is_plausible_split(&problem, &s.text));

    if before > 0 && lint.suggestions.is_empty() && lint.category == Category::Spelling {
        debug!(problem = %problem, "all engine suggestions were implausible splits");
        if let Some(repair) = collapse_doubled_consonant(&problem) {
            lint.suggestions.push(Suggestion::replace(repair));
        }
    }

    lint
}

fn introduces_space(problem: &str, suggestion: &str) -> bool {
    suggestion.contains(char::is_whitespace) && !problem.contains(char::is_whitespace)
}

/// A split is kept only when it yields exactly two real words whose
/// combined length is clearly different from the original word.
fn is_plausible_split(problem: &str, suggestion: &str) -> bool {
    let pieces: Vec<&str> = suggestion.split_whitespace().collect();
    let [first, second] = pieces.as_slice() else {
        return false;
    };
    let (a, b) = (first.chars().count(), second.chars().count());
    a >= MIN_SPLIT_PIECE
        && b >= MIN_SPLIT_PIECE
        && (a + b).abs_diff(problem.chars().count()) > 1
}

/// Collapses the first doubled consonant (`tt` → `t`). Single pass.
pub fn collapse_doubled_consonant(word: &str) -> Option<String> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let index = chars
        .windows(2)
        .find(|w| {
            let (a, b) = (w[0].1, w[1].1);
            is_consonant(a) && a.to_ascii_lowercase() == b.to_ascii_lowercase()
        })
        .map(|w| w[1].0)?;

    let mut repaired = String::with_capacity(word.len());
    repaired.push_str(&word[..index]);
    repaired.push_str(&word[index..].chars().skip(1).collect::<String>());
    Some(repaired)
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}
