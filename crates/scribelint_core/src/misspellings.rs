//! Known-misspelling dictionary.

use std::collections::{BTreeMap, HashMap};

/// Built-in `misspelling → correction` pairs, all lowercase.
const BUILTIN: &[(&str, &str)] = &[
    ("accomodate", "accommodate"),
    ("acheive", "achieve"),
    ("adress", "address"),
    ("alot", "a lot"),
    ("arguement", "argument"),
    ("begining", "beginning"),
    ("beleive", "believe"),
    ("calender", "calendar"),
    ("commited", "committed"),
    ("concensus", "consensus"),
    ("definately", "definitely"),
    ("embarass", "embarrass"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("goverment", "government"),
    ("grammer", "grammar"),
    ("happend", "happened"),
    ("independant", "independent"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("persue", "pursue"),
    ("posession", "possession"),
    ("recieve", "receive"),
    ("recomend", "recommend"),
    ("seperate", "separate"),
    ("succesful", "successful"),
    ("tommorow", "tomorrow"),
    ("truely", "truly"),
    ("untill", "until"),
    ("wich", "which"),
    ("writting", "writing"),
];

/// Maps lowercase misspellings to their canonical correction.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Creates a dictionary holding only the built-in table.
    pub fn new() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(word, fix)| (word.to_string(), fix.to_string()))
                .collect(),
        }
    }

    /// Creates the built-in dictionary extended with `extra`.
    ///
    /// Extra keys are lowercased and override built-in entries.
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let mut dictionary = Self::new();
        for (word, fix) in extra {
            dictionary.insert(word, fix);
        }
        dictionary
    }

    /// Adds or replaces one entry.
    pub fn insert(&mut self, word: &str, correction: &str) {
        self.entries
            .insert(word.to_lowercase(), correction.to_string());
    }

    /// Looks up the canonical correction for `word`, ignoring case.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Iterates the entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let dictionary = Dictionary::new();
        assert_eq!(dictionary.lookup("writting"), Some("writing"));
        assert_eq!(dictionary.lookup("WRITTING"), Some("writing"));
        assert_eq!(dictionary.lookup("writing"), None);
    }

    #[test]
    fn extra_entries_override_builtins() {
        let extra = BTreeMap::from([
            ("Teh".to_string(), "the".to_string()),
            ("alot".to_string(), "many".to_string()),
        ]);
        let dictionary = Dictionary::with_extra(&extra);

        assert_eq!(dictionary.lookup("teh"), Some("the"));
        assert_eq!(dictionary.lookup("alot"), Some("many"));
        assert_eq!(dictionary.len(), BUILTIN.len() + 1);
    }

    #[test]
    fn builtin_keys_are_lowercase() {
        for (word, _) in BUILTIN {
            assert_eq!(*word, word.to_lowercase());
        }
    }
}
