/// Letter-case shape of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseShape {
    /// No uppercase letters (or no letters at all).
    Lower,
    /// First letter uppercase, at least one lowercase letter after it.
    Capitalized,
    /// Every letter uppercase, at least two letters.
    Upper,
    /// Anything else, e.g. `iPhone`.
    Mixed,
}

impl CaseShape {
    /// Classifies `word`.
    pub fn of(word: &str) -> Self {
        let mut letters = word.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return CaseShape::Lower;
        };
        let rest: Vec<char> = letters.collect();

        let rest_upper = rest.iter().all(|c| c.is_uppercase());
        let rest_lower = rest.iter().all(|c| c.is_lowercase());

        match (first.is_uppercase(), rest.is_empty()) {
            (false, _) if rest_lower => CaseShape::Lower,
            (true, true) => CaseShape::Capitalized,
            (true, false) if rest_upper => CaseShape::Upper,
            (true, false) if rest_lower => CaseShape::Capitalized,
            _ => CaseShape::Mixed,
        }
    }
}

/// Uppercases the first character of `word`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns `correction` in the case shape of `original`.
///
/// ALL CAPS stays all caps, Capitalised stays capitalised; lowercase and
/// mixed originals leave the correction untouched.
pub fn match_case(correction: &str, original: &str) -> String {
    match CaseShape::of(original) {
        CaseShape::Upper => correction.to_uppercase(),
        CaseShape::Capitalized => capitalize(correction),
        CaseShape::Lower | CaseShape::Mixed => correction.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("writting", CaseShape::Lower)]
    #[case("Writting", CaseShape::Capitalized)]
    #[case("WRITTING", CaseShape::Upper)]
    #[case("I", CaseShape::Capitalized)]
    #[case("iPhone", CaseShape::Mixed)]
    #[case("123", CaseShape::Lower)]
    fn classifies_shapes(#[case] word: &str, #[case] expected: CaseShape) {
        assert_eq!(CaseShape::of(word), expected);
    }

    #[rstest]
    #[case("writing", "writting", "writing")]
    #[case("writing", "Writting", "Writing")]
    #[case("writing", "WRITTING", "WRITING")]
    #[case("a lot", "Alot", "A lot")]
    fn matches_case(#[case] correction: &str, #[case] original: &str, #[case] expected: &str) {
        assert_eq!(match_case(correction, original), expected);
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("keep"), "Keep");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
