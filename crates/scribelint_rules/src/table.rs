//! The built-in rule table.
//!
//! Order matters: when two rules match overlapping text, the one listed first
//! wins. Patterns are compiled case-insensitively.

use regex::Captures;
use scribelint_plugin::{Category, LintKind};
use scribelint_text::match_case;

use crate::engine::compile_all;
use crate::{Rule, RuleSpec, Template};

/// Compiles the built-in rule table.
pub fn default_rules() -> Vec<Rule> {
    compile_all(default_specs())
}

fn lit(text: &str) -> Template {
    Template::literal(text)
}

fn default_specs() -> Vec<RuleSpec> {
    vec![
        // Agreement
        RuleSpec::new(
            "agreement-dont",
            r"\b(he|she|it)\s+don['\x{2019}]t\b",
            LintKind::Agreement,
            lit("Use \"doesn't\" with \"${1}\"."),
        )
        .suggest(lit("${1} doesn't")),
        RuleSpec::new(
            "agreement-was",
            r"\b(they|we|you)\s+was\b",
            LintKind::Agreement,
            lit("Use \"were\" with \"${1}\"."),
        )
        .suggest(lit("${1} were")),
        // Repetition
        RuleSpec::new(
            "doubled-word",
            r"\b(?:the\s+the|and\s+and|to\s+to|of\s+of|is\s+is|in\s+in|it\s+it|that\s+that|for\s+for|on\s+on|with\s+with|was\s+was|be\s+be|are\s+are|this\s+this|an\s+an|a\s+a)\b",
            LintKind::Repetition,
            lit("This word is repeated."),
        )
        .suggest(Template::Computed(first_word)),
        // Articles
        RuleSpec::new(
            "article-a-an",
            r"\b(a|an)\s+([a-z]+)\b",
            LintKind::Grammar,
            Template::Computed(article_message),
        )
        .suggest(Template::Computed(article_suggestion)),
        // Modal + "of"
        RuleSpec::new(
            "modal-of",
            r"\b(could|should|would|must|might)\s+of\b",
            LintKind::Grammar,
            lit("Did you mean \"${1} have\"?"),
        )
        .suggest(lit("${1} have")),
        RuleSpec::new(
            "than-then",
            r"\b(more|less|better|worse|rather|fewer)\s+then\b",
            LintKind::WordChoice,
            lit("Use \"than\" for comparisons."),
        )
        .suggest(lit("${1} than"))
        .category(Category::Grammar),
        RuleSpec::new(
            "your-welcome",
            r"\byour\s+welcome\b",
            LintKind::Grammar,
            lit("Did you mean \"you're welcome\"?"),
        )
        .suggest(lit("you're welcome")),
        RuleSpec::new(
            "its-own",
            r"\bit['\x{2019}]s\s+own\b",
            LintKind::Grammar,
            lit("The possessive is \"its\"."),
        )
        .suggest(lit("its own")),
        RuleSpec::new(
            "could-care-less",
            r"\bcould\s+care\s+less\b",
            LintKind::WordChoice,
            lit("The idiom is \"couldn't care less\"."),
        )
        .suggest(lit("couldn't care less")),
        // Word choice
        RuleSpec::new(
            "alot",
            r"\balot\b",
            LintKind::Spelling,
            lit("\"A lot\" is two words."),
        )
        .suggest(lit("a lot")),
        RuleSpec::new(
            "irregardless",
            r"\birregardless\b",
            LintKind::WordChoice,
            lit("Use \"regardless\"."),
        )
        .suggest(lit("regardless")),
        // Redundancy
        RuleSpec::new(
            "in-order-to",
            r"\bin\s+order\s+to\b",
            LintKind::Redundancy,
            lit("\"In order to\" can usually be shortened to \"to\"."),
        )
        .suggest(lit("to")),
        RuleSpec::new(
            "due-to-the-fact",
            r"\bdue\s+to\s+the\s+fact\s+that\b",
            LintKind::Redundancy,
            lit("Consider \"because\"."),
        )
        .suggest(lit("because")),
        RuleSpec::new(
            "at-this-point-in-time",
            r"\bat\s+this\s+point\s+in\s+time\b",
            LintKind::Redundancy,
            lit("Consider \"now\"."),
        )
        .suggest(lit("now")),
        RuleSpec::new(
            "each-and-every",
            r"\beach\s+and\s+every\b",
            LintKind::Redundancy,
            lit("\"Each and every\" is redundant."),
        )
        .suggest(lit("each"))
        .suggest(lit("every")),
        RuleSpec::new(
            "very-unique",
            r"\bvery\s+(unique)\b",
            LintKind::Redundancy,
            lit("\"${1}\" is already absolute; drop \"very\"."),
        )
        .suggest(lit("${1}")),
        // Punctuation
        RuleSpec::new(
            "space-before-punctuation",
            r"\b[ \t]+([,;])",
            LintKind::Punctuation,
            lit("Remove the space before \"${1}\"."),
        )
        .suggest(lit("${1}")),
        RuleSpec::new(
            "repeated-exclamation",
            r"!{2,}",
            LintKind::Style,
            lit("Use a single exclamation mark."),
        )
        .suggest(lit("!")),
        // Off by default: too noisy for everyday prose.
        RuleSpec::new(
            "passive-voice",
            r"\b(?:is|are|was|were|be|been|being)\s+([a-z]+ed)\b",
            LintKind::Style,
            lit("Consider using the active voice."),
        )
        .disabled(),
    ]
}

fn first_word(caps: &Captures<'_>) -> Option<String> {
    caps.get(0)?
        .as_str()
        .split_whitespace()
        .next()
        .map(str::to_string)
}

/// Words that are never the noun an article belongs to.
const NOT_A_NOUN: &[&str] = &[
    "a", "an", "and", "or", "of", "in", "on", "at", "is", "it", "if", "as", "to", "the", "by",
];

/// Vowel-initial words pronounced with a leading consonant sound.
const CONSONANT_SOUND_PREFIXES: &[&str] = &[
    "univ", "unif", "union", "uniq", "unit", "unic", "unis", "use", "usu", "usa", "uti", "uran",
    "eu", "ewe", "ukul",
];
const CONSONANT_SOUND_WORDS: &[&str] = &["one", "once"];

/// Consonant-initial words pronounced with a leading vowel sound.
const VOWEL_SOUND_PREFIXES: &[&str] = &["hour", "honest", "honor", "honour", "heir"];

fn expected_article(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    if NOT_A_NOUN.contains(&lower.as_str()) {
        return None;
    }
    // Acronyms depend on how the letters are spoken.
    if word.len() > 1 && word.chars().all(|c| c.is_uppercase()) {
        return None;
    }
    if VOWEL_SOUND_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Some("an");
    }
    if CONSONANT_SOUND_WORDS.contains(&lower.as_str())
        || CONSONANT_SOUND_PREFIXES.iter().any(|p| lower.starts_with(p))
    {
        return Some("a");
    }
    match lower.chars().next()? {
        'a' | 'e' | 'i' | 'o' | 'u' => Some("an"),
        _ => Some("a"),
    }
}

/// Returns `(written article, noun, expected article)` when they disagree.
fn article_mismatch<'c>(caps: &Captures<'c>) -> Option<(&'c str, &'c str, &'static str)> {
    let article = caps.get(1)?.as_str();
    let word = caps.get(2)?.as_str();
    let expected = expected_article(word)?;
    if article.eq_ignore_ascii_case(expected) {
        None
    } else {
        Some((article, word, expected))
    }
}

fn article_message(caps: &Captures<'_>) -> Option<String> {
    let (_, word, expected) = article_mismatch(caps)?;
    Some(format!("Use \"{expected}\" before \"{word}\"."))
}

fn article_suggestion(caps: &Captures<'_>) -> Option<String> {
    let (article, word, expected) = article_mismatch(caps)?;
    Some(format!("{} {word}", match_case(expected, article)))
}
