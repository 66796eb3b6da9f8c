//! Small pure helpers shared by the scorers and exposed to callers.
//! Every division guards its denominator, so nothing here returns NaN.

use std::collections::HashSet;

use crate::ats::models::Assessment;
use crate::ats::policy::{ASSESSMENT_EXCELLENT, ASSESSMENT_FAIR, ASSESSMENT_GOOD};
use crate::ats::tokenizer::{count_term, normalize_text};

pub use crate::ats::tokenizer::word_count;

/// Matched keywords as a percentage of `total`.
pub fn match_rate(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64 * 100.0
}

/// Simple density: distinct matched keywords per hundred resume words.
pub fn keyword_density(matched: usize, words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    matched as f64 / words as f64 * 100.0
}

/// Whole-word occurrences of each distinct keyword in `text`, in first-seen order.
pub fn keyword_occurrences(keywords: &[String], text: &str) -> Vec<(String, usize)> {
    let haystack = normalize_text(text);
    let mut seen = HashSet::new();
    keywords
        .iter()
        .filter_map(|kw| {
            let term = normalize_text(kw);
            if term.is_empty() || !seen.insert(term.clone()) {
                return None;
            }
            let count = count_term(&haystack, &term);
            Some((term, count))
        })
        .collect()
}

/// Occurrence-based density: total keyword occurrences per hundred resume words.
pub fn occurrence_density(keywords: &[String], text: &str) -> f64 {
    let occurrences: usize = keyword_occurrences(keywords, text)
        .iter()
        .map(|(_, count)| count)
        .sum();
    keyword_density(occurrences, word_count(text))
}

/// Round half-up to one decimal place. Inputs are never negative here.
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

pub fn assess(total: f64) -> Assessment {
    if total >= ASSESSMENT_EXCELLENT {
        Assessment::Excellent
    } else if total >= ASSESSMENT_GOOD {
        Assessment::Good
    } else if total >= ASSESSMENT_FAIR {
        Assessment::Fair
    } else {
        Assessment::Weak
    }
}
