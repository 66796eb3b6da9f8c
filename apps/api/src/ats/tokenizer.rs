//! Text normalization, tokenization, and the heuristic suffix stemmer.
//!
//! The stemmer is deliberately crude. Scores depend on its exact rule list and
//! ordering, so changing a rule changes every downstream score.

use crate::ats::policy::SHORT_TERM_MAX_CHARS;
use crate::ats::vocabulary::COMPOUND_TERMS;

/// Suffix rules, most specific first. The first rule that leaves at least
/// `MIN_STEM_CHARS` characters is applied; nothing is stripped twice.
const SUFFIX_RULES: &[&str] = &[
    "ational", "ization", "tion", "ment", "ness", "ful", "ing", "ed", "ly", "er", "s",
];

const MIN_STEM_CHARS: usize = 3;
const MIN_STEMMABLE_CHARS: usize = 4;

/// Lower-cases `text`, rewrites compound spellings (`c++`, `ci/cd`, `node.js`)
/// to fixed tokens, turns every other non-alphanumeric character into a space,
/// and collapses whitespace.
pub fn normalize_text(text: &str) -> String {
    let mut lowered = text.to_lowercase();
    for (spelling, token) in COMPOUND_TERMS {
        if lowered.contains(spelling) {
            lowered = lowered.replace(spelling, &format!(" {token} "));
        }
    }

    let spaced: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized tokens of `text`, dropping single-character tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    tokenize(text).len()
}

/// Heuristic stem of a single normalized word.
pub fn stem(word: &str) -> String {
    if word.chars().count() < MIN_STEMMABLE_CHARS {
        return word.to_string();
    }
    for suffix in SUFFIX_RULES {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.chars().count() >= MIN_STEM_CHARS {
                return base.to_string();
            }
        }
    }
    word.to_string()
}

/// Whether `term` occurs in the normalized `haystack`.
///
/// Terms of up to `SHORT_TERM_MAX_CHARS` characters must sit on word
/// boundaries; longer terms match as plain substrings.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if term.chars().count() > SHORT_TERM_MAX_CHARS {
        return haystack.contains(term);
    }
    count_term(haystack, term) > 0
}

/// Whole-word occurrences of `term` in the normalized `haystack`.
pub fn count_term(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    let bytes = haystack.as_bytes();
    haystack
        .match_indices(term)
        .filter(|(start, matched)| {
            let end = start + matched.len();
            let before_ok = *start == 0 || bytes[start - 1] == b' ';
            let after_ok = end == bytes.len() || bytes[end] == b' ';
            before_ok && after_ok
        })
        .count()
}
