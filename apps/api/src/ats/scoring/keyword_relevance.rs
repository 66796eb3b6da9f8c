//! Keyword Relevance (0 – 45).
//!
//! Per matched keyword: base points by (priority, match type) × saturating
//! frequency multiplier + the single best placement bonus. The sum is capped,
//! then a flat penalty applies when several keywords are stuffed.

use crate::ats::metrics::keyword_occurrences;
use crate::ats::models::{ExtractedKeywords, MatchDetail, MatchResult, ResumeData};
use crate::ats::policy::{
    keyword_base_points, FREQUENCY_MULTIPLIER_CAP, FREQUENCY_MULTIPLIER_STEP,
    KEYWORD_RELEVANCE_CAP, PLACEMENT_BONUS_FIRST_BULLET, PLACEMENT_BONUS_SUMMARY,
    PLACEMENT_BONUS_TITLE, STUFFING_KEYWORD_COUNT, STUFFING_OCCURRENCE_THRESHOLD,
    STUFFING_PENALTY, SUMMARY_ZONE_LINES,
};
use crate::ats::tokenizer::{contains_term, normalize_text};

/// Normalized resume zones that earn a placement bonus.
struct PlacementZones {
    title: String,
    summary: String,
    first_bullets: Vec<String>,
}

impl PlacementZones {
    fn new(resume_text: &str, resume: &ResumeData) -> Self {
        let summary_lines: Vec<&str> = resume_text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(SUMMARY_ZONE_LINES)
            .collect();
        Self {
            title: normalize_text(resume.title_text()),
            summary: normalize_text(&summary_lines.join(" ")),
            first_bullets: resume
                .experiences
                .iter()
                .filter_map(|e| e.highlights.first())
                .map(|h| normalize_text(h))
                .collect(),
        }
    }

    /// Highest single bonus earned by `term`; tiers do not stack.
    fn bonus(&self, term: &str) -> f64 {
        if contains_term(&self.title, term) {
            PLACEMENT_BONUS_TITLE
        } else if contains_term(&self.summary, term) {
            PLACEMENT_BONUS_SUMMARY
        } else if self.first_bullets.iter().any(|b| contains_term(b, term)) {
            PLACEMENT_BONUS_FIRST_BULLET
        } else {
            0.0
        }
    }
}

/// 1 + min(cap, (frequency − 1) × step)
pub fn frequency_multiplier(frequency: u32) -> f64 {
    let repeats = frequency.saturating_sub(1) as f64;
    1.0 + (repeats * FREQUENCY_MULTIPLIER_STEP).min(FREQUENCY_MULTIPLIER_CAP)
}

/// Keywords repeated at least the stuffing threshold in the resume text.
pub fn stuffed_keywords(matched: &[String], resume_text: &str) -> Vec<String> {
    keyword_occurrences(matched, resume_text)
        .into_iter()
        .filter(|(_, count)| *count >= STUFFING_OCCURRENCE_THRESHOLD)
        .map(|(keyword, _)| keyword)
        .collect()
}

fn contribution(detail: &MatchDetail, extracted: &ExtractedKeywords, zones: &PlacementZones) -> f64 {
    let priority = extracted.priority_of(&detail.keyword);
    let base = keyword_base_points(priority, detail.match_type);
    let multiplier = frequency_multiplier(extracted.frequency_of(&detail.keyword));
    base * multiplier + zones.bonus(&normalize_text(&detail.keyword))
}

pub fn score_keyword_relevance(
    extracted: &ExtractedKeywords,
    matches: &MatchResult,
    resume_text: &str,
    resume: &ResumeData,
) -> f64 {
    if matches.match_details.is_empty() {
        return 0.0;
    }

    let zones = PlacementZones::new(resume_text, resume);
    let raw: f64 = matches
        .match_details
        .iter()
        .map(|d| contribution(d, extracted, &zones))
        .sum();
    let capped = raw.min(KEYWORD_RELEVANCE_CAP);

    let stuffed = stuffed_keywords(&matches.matched, resume_text);
    if stuffed.len() >= STUFFING_KEYWORD_COUNT {
        tracing::debug!(stuffed = ?stuffed, "keyword stuffing penalty applied");
        (capped - STUFFING_PENALTY).max(0.0)
    } else {
        capped
    }
}
