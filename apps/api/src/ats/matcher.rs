//! Keyword Matcher: classifies each keyword as exact, stem, or synonym matched, or missing.
//!
//! Checks run strictly in tie-break order (exact → stem → synonym) and the first
//! success wins, so a keyword present verbatim is always reported as exact.

use std::collections::HashSet;

use crate::ats::models::{MatchDetail, MatchResult, MatchType};
use crate::ats::policy::SHORT_TERM_MAX_CHARS;
use crate::ats::tokenizer::{contains_term, normalize_text, stem};
use crate::ats::vocabulary::synonyms_for;

/// Resume text prepared once and reused for every keyword.
pub struct ResumeIndex {
    normalized: String,
    /// Distinct tokens in first-seen order, paired with their stems.
    stemmed_tokens: Vec<(String, String)>,
}

impl ResumeIndex {
    pub fn new(resume_text: &str) -> Self {
        let normalized = normalize_text(resume_text);
        let stemmed_tokens = {
            let mut seen = HashSet::new();
            normalized
                .split(' ')
                .filter(|t| t.chars().count() > 1 && seen.insert(*t))
                .map(|t| (t.to_string(), stem(t)))
                .collect()
        };
        Self {
            normalized,
            stemmed_tokens,
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// First resume token whose stem contains `word_stem`. Short stems must match whole.
    fn token_with_stem(&self, word_stem: &str) -> Option<&str> {
        let short = word_stem.chars().count() <= SHORT_TERM_MAX_CHARS;
        self.stemmed_tokens
            .iter()
            .find(|(_, token_stem)| {
                if short {
                    token_stem == word_stem
                } else {
                    token_stem.contains(word_stem)
                }
            })
            .map(|(token, _)| token.as_str())
    }
}

/// Matches every keyword independently against the resume text.
/// Duplicate keywords each produce their own entry.
pub fn match_keywords(keywords: &[String], resume_text: &str) -> MatchResult {
    let index = ResumeIndex::new(resume_text);
    match_against(keywords, &index)
}

pub fn match_against(keywords: &[String], index: &ResumeIndex) -> MatchResult {
    let mut result = MatchResult::default();
    for keyword in keywords {
        match find_match(keyword, index) {
            Some(detail) => {
                result.matched.push(keyword.clone());
                result.match_details.push(detail);
            }
            None => result.missing.push(keyword.clone()),
        }
    }
    result
}

/// Strongest match for a single keyword, if any.
pub fn find_match(keyword: &str, index: &ResumeIndex) -> Option<MatchDetail> {
    let term = normalize_text(keyword);
    if term.is_empty() || index.is_empty() {
        return None;
    }

    let detail = |match_type: MatchType, matched_as: Option<String>| MatchDetail {
        keyword: keyword.to_string(),
        match_type,
        matched_as,
    };

    if contains_term(index.normalized(), &term) {
        return Some(detail(MatchType::Exact, None));
    }

    if let Some(fragment) = stem_match(&term, index) {
        return Some(detail(MatchType::Stem, Some(fragment)));
    }

    synonyms_for(&term)
        .into_iter()
        .find(|variant| contains_term(index.normalized(), variant))
        .map(|variant| detail(MatchType::Synonym, Some(variant.to_string())))
}

/// Every word of the term must have its stem inside some resume token's stem.
/// Returns the resume tokens that satisfied the match.
fn stem_match(term: &str, index: &ResumeIndex) -> Option<String> {
    let fragments: Option<Vec<&str>> = term
        .split(' ')
        .map(|word| index.token_with_stem(&stem(word)))
        .collect();
    fragments.map(|f| f.join(" "))
}
