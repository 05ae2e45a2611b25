//! Closed word classes used by the clause detector.
//!
//! All lists are lowercase; lookups lowercase their input.

/// Subject pronouns that can open an independent clause.
pub(crate) const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "we", "they"];

/// Words after which a following clause is grammatically attached, so no
/// punctuation is missing.
const CONNECTORS: &[&str] = &[
    // subordinators
    "after", "although", "as", "because", "before", "if", "once", "since", "so", "than", "that",
    "though", "till", "unless", "until", "whereas", "whether", "while", "whenever", "wherever",
    // coordinators
    "and", "but", "for", "nor", "or", "yet", "then", "also", "plus",
    // prepositions
    "about", "above", "against", "at", "by", "from", "in", "into", "like", "of", "off", "on",
    "onto", "over", "to", "toward", "towards", "under", "with", "without",
    // reporting and cognition verbs
    "said", "say", "says", "saying", "think", "thinks", "thought", "know", "knew", "knows",
    "believe", "believed", "hope", "hoped", "guess", "feel", "felt", "wish", "mean", "meant",
    "suppose", "told", "tell", "realize", "realized", "bet", "heard", "see", "saw", "sure",
    "glad", "sorry", "afraid",
    // auxiliaries
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "can", "could", "will", "would", "shall", "should", "may", "might", "must",
    // question words
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
    // pronouns and determiners
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
    "your", "his", "its", "our", "their", "this", "these", "those", "the", "a", "an",
    // adverbs that commonly precede a subject inside one clause
    "not", "even", "just", "only", "maybe", "perhaps", "really", "now", "here", "there",
];

/// Finite verb forms that can follow a subject pronoun.
const FINITE_VERBS: &[&str] = &[
    "am", "is", "are", "was", "were", "have", "has", "had", "do", "does", "did", "can",
    "could", "will", "would", "should", "shall", "may", "might", "must",
    "go", "goes", "went", "get", "gets", "got", "make", "makes", "made", "take", "takes",
    "took", "see", "sees", "saw", "know", "knows", "knew", "think", "thinks", "thought",
    "want", "wants", "wanted", "need", "needs", "needed", "like", "likes", "liked", "love",
    "loves", "loved", "hate", "hates", "hated", "feel", "feels", "felt", "come", "comes",
    "came", "say", "says", "said", "tell", "tells", "told", "give", "gives", "gave", "find",
    "finds", "found", "work", "works", "worked", "try", "tries", "tried", "call", "calls",
    "called", "ask", "asks", "asked", "leave", "leaves", "left", "keep", "keeps", "kept",
    "eat", "eats", "ate", "hope", "hopes", "hoped", "forget", "forgot", "worry", "worried",
    "agree", "agreed", "believe", "believes", "believed", "play", "plays", "played",
    "live", "lives", "lived", "run", "runs", "ran", "buy", "buys", "bought", "wrote",
    "write", "writes", "read", "reads", "start", "started", "stop", "stopped", "wait",
    "waited", "miss", "missed", "guess", "mean", "meant", "use", "used", "bring", "brought",
    "sleep", "sleeps", "slept", "sit", "sits", "sat", "stay", "stays", "stayed", "walk",
    "walks", "walked", "talk", "talks", "talked", "watch", "watched", "met", "won", "lost",
];

/// Nouns and adverbs that typically end a clause, e.g. `a day`, `at home`.
const CLAUSE_ENDINGS: &[&str] = &[
    "day", "days", "time", "times", "today", "tonight", "tomorrow", "yesterday", "week",
    "weeks", "month", "year", "years", "morning", "afternoon", "evening", "night", "home",
    "work", "school", "again", "later", "soon", "first", "things", "everything", "anything",
    "something", "nothing", "everyone", "anyway", "too", "well", "outside", "inside", "away",
];

/// Base-form verbs that open an imperative clause.
const IMPERATIVE_VERBS: &[&str] = &[
    "keep", "take", "make", "give", "bring", "let", "put", "get", "call", "ask", "tell",
    "send", "check", "try", "use", "leave", "turn", "pick", "grab", "enjoy", "remember",
    "read", "watch", "write", "find", "see", "have", "follow", "join", "visit",
];

/// Words that can open the object of an imperative verb.
const OBJECT_OPENERS: &[&str] = &[
    "a", "an", "the", "your", "my", "his", "her", "our", "their", "this", "that", "these",
    "those", "it", "them", "me", "us", "him", "some", "any", "every", "each",
];

fn contains(list: &[&str], word: &str) -> bool {
    let lower = word.to_lowercase();
    list.contains(&lower.as_str())
}

pub(crate) fn is_connector(word: &str) -> bool {
    contains(CONNECTORS, word)
}

pub(crate) fn is_subject_pronoun(word: &str) -> bool {
    contains(SUBJECT_PRONOUNS, word)
}

/// Matches `don't`, `can't`, `won't` and friends, with either apostrophe.
pub(crate) fn is_negative_contraction(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.ends_with("n't") || lower.ends_with("n\u{2019}t")
}

pub(crate) fn is_finite_verb(word: &str) -> bool {
    contains(FINITE_VERBS, word)
}

pub(crate) fn is_clause_ending(word: &str) -> bool {
    contains(CLAUSE_ENDINGS, word)
}

pub(crate) fn is_imperative_verb(word: &str) -> bool {
    contains(IMPERATIVE_VERBS, word)
}

pub(crate) fn is_object_opener(word: &str) -> bool {
    contains(OBJECT_OPENERS, word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        assert!(is_connector("Because"));
        assert!(is_subject_pronoun("They"));
        assert!(is_clause_ending("DAY"));
        assert!(!is_connector("home"));
    }

    #[test]
    fn negative_contractions() {
        assert!(is_negative_contraction("don't"));
        assert!(is_negative_contraction("Can\u{2019}t"));
        assert!(!is_negative_contraction("dont"));
        assert!(!is_negative_contraction("it's"));
    }

    #[test]
    fn every_pronoun_is_a_connector() {
        for pronoun in SUBJECT_PRONOUNS {
            assert!(is_connector(pronoun), "{pronoun} should be a connector");
        }
    }
}
