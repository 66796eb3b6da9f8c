//! Tunable scoring policy. Point values, multipliers, and thresholds live here
//! so they can be recalibrated without touching control flow.

use crate::ats::models::{KeywordPriority, MatchType};

// ── Matching ────────────────────────────────────────────────────────────────

/// Terms this short only match on word boundaries.
pub const SHORT_TERM_MAX_CHARS: usize = 3;

// ── Extraction ──────────────────────────────────────────────────────────────

pub const DEFAULT_KEYWORD_COUNT: usize = 20;
pub const MAX_DYNAMIC_KEYWORD_COUNT: usize = 35;
/// Descriptions up to this many words get the default count.
pub const DYNAMIC_COUNT_BASE_WORDS: usize = 150;
/// One extra keyword per this many words past the base.
pub const DYNAMIC_COUNT_WORDS_PER_KEYWORD: usize = 40;

/// Rank weight of the zone a keyword was found in.
pub fn zone_rank_weight(priority: KeywordPriority) -> f64 {
    match priority {
        KeywordPriority::Title => 5.0,
        KeywordPriority::Required => 4.0,
        KeywordPriority::Responsibilities => 3.0,
        KeywordPriority::NiceToHave => 2.0,
        KeywordPriority::General => 1.0,
    }
}

pub const RANK_ZONE_FACTOR: f64 = 2.0;
pub const RANK_FREQUENCY_STEP: f64 = 0.5;
pub const RANK_FREQUENCY_CAP: u32 = 10;
pub const RANK_TECHNOLOGY_BONUS: f64 = 1.5;

// ── Keyword relevance (0 – 45) ─────────────────────────────────────────────

pub const KEYWORD_RELEVANCE_CAP: f64 = 45.0;

/// Base points for one matched keyword.
pub fn keyword_base_points(priority: KeywordPriority, match_type: MatchType) -> f64 {
    match (priority, match_type) {
        (KeywordPriority::Title, MatchType::Exact) => 4.0,
        (KeywordPriority::Title, MatchType::Stem) => 3.2,
        (KeywordPriority::Title, MatchType::Synonym) => 2.8,
        (KeywordPriority::Required, MatchType::Exact) => 3.5,
        (KeywordPriority::Required, MatchType::Stem) => 2.8,
        (KeywordPriority::Required, MatchType::Synonym) => 2.4,
        (KeywordPriority::Responsibilities, MatchType::Exact) => 2.5,
        (KeywordPriority::Responsibilities, MatchType::Stem) => 2.0,
        (KeywordPriority::Responsibilities, MatchType::Synonym) => 1.7,
        (KeywordPriority::NiceToHave, MatchType::Exact) => 2.0,
        (KeywordPriority::NiceToHave, MatchType::Stem) => 1.6,
        (KeywordPriority::NiceToHave, MatchType::Synonym) => 1.4,
        (KeywordPriority::General, MatchType::Exact) => 1.5,
        (KeywordPriority::General, MatchType::Stem) => 1.2,
        (KeywordPriority::General, MatchType::Synonym) => 1.0,
    }
}

pub const FREQUENCY_MULTIPLIER_STEP: f64 = 0.1;
pub const FREQUENCY_MULTIPLIER_CAP: f64 = 0.5;

pub const PLACEMENT_BONUS_TITLE: f64 = 1.0;
pub const PLACEMENT_BONUS_SUMMARY: f64 = 0.5;
pub const PLACEMENT_BONUS_FIRST_BULLET: f64 = 0.3;
/// Leading resume lines treated as the summary zone.
pub const SUMMARY_ZONE_LINES: usize = 5;

pub const STUFFING_OCCURRENCE_THRESHOLD: usize = 5;
pub const STUFFING_KEYWORD_COUNT: usize = 3;
pub const STUFFING_PENALTY: f64 = 5.0;

// ── Skills quality (0 – 25) ────────────────────────────────────────────────

pub const SKILLS_QUALITY_CAP: f64 = 25.0;
pub const SKILLS_COVERAGE_CAP: f64 = 12.0;
pub const SKILLS_ALIGNMENT_CAP: f64 = 8.0;
pub const SKILLS_BREADTH_CAP: f64 = 5.0;
/// Credit for a skill the keyword matcher already rewarded.
pub const ALREADY_CREDITED_FACTOR: f64 = 0.8;
pub const ALIGNMENT_TOP_KEYWORDS: usize = 10;
pub const ALIGNMENT_PRIORITY_WEIGHT: f64 = 1.5;
pub const BREADTH_POINTS_PER_SKILL: f64 = 0.5;

// ── Experience alignment (0 – 20) ──────────────────────────────────────────

pub const EXPERIENCE_CAP: f64 = 20.0;
/// Management wins only with at least this many more signals than IC.
pub const MANAGEMENT_SIGNAL_MARGIN: usize = 2;

pub const YEARS_CAP_MANAGEMENT: f64 = 6.0;
pub const YEARS_CAP_IC: f64 = 9.0;
pub const OVERQUALIFIED_RATIO: f64 = 1.8;
pub const OVERQUALIFIED_PENALTY_SLOPE: f64 = 0.15;
pub const OVERQUALIFIED_PENALTY_MAX: f64 = 0.2;
pub const YEARS_DECAY_FACTOR: f64 = 0.3;
pub const YEARS_DECAY_FLOOR: f64 = 0.5;
/// Fraction of the years cap when the description states no requirement.
pub const YEARS_UNSTATED_CREDIT: f64 = 0.75;

pub const TEAM_SIZE_CAP: f64 = 6.0;
/// (ratio of target, fraction of cap), checked top-down.
pub const TEAM_SIZE_TIERS: &[(f64, f64)] = &[(1.0, 1.0), (0.7, 0.75), (0.5, 0.5)];
pub const TEAM_SIZE_FLOOR_CREDIT: f64 = 0.25;
/// Fraction of the cap when the description names no team size.
pub const TEAM_SIZE_UNSTATED_CREDIT: f64 = 0.67;

pub const DEPTH_CAP: f64 = 3.0;
pub const DEPTH_MULTI_ROLE: f64 = 1.5;
pub const DEPTH_SINGLE_ROLE: f64 = 0.75;
pub const DEPTH_BROAD_SKILLS: f64 = 1.5;
pub const DEPTH_SOME_SKILLS: f64 = 0.75;
pub const DEPTH_BROAD_SKILL_COUNT: usize = 5;

pub const TITLE_MATCH_CAP: f64 = 5.0;

pub const EDUCATION_CAP: f64 = 3.0;
pub const EDUCATION_LEVEL_POINTS: f64 = 2.5;
pub const EDUCATION_ONE_SHORT_FACTOR: f64 = 0.5;
pub const EDUCATION_FIELD_BONUS: f64 = 0.5;

pub const DOMAIN_MISMATCH_FACTOR: f64 = 0.6;

// ── Match quality (0 – 10) ─────────────────────────────────────────────────

pub const MATCH_QUALITY_CAP: f64 = 10.0;
pub const EXACT_RATIO_CAP: f64 = 4.0;
pub const DENSITY_CAP: f64 = 3.0;
/// Occurrence density (percent) bands.
pub const DENSITY_FLOOR: f64 = 0.5;
pub const DENSITY_OPTIMAL_LOW: f64 = 2.0;
pub const DENSITY_OPTIMAL_HIGH: f64 = 3.0;
pub const DENSITY_CEILING: f64 = 6.0;
pub const COMPLETENESS_CAP: f64 = 3.0;
pub const COMPLETENESS_PER_SECTION: f64 = 0.75;

// ── Assessment ──────────────────────────────────────────────────────────────

pub const ASSESSMENT_EXCELLENT: f64 = 85.0;
pub const ASSESSMENT_GOOD: f64 = 70.0;
pub const ASSESSMENT_FAIR: f64 = 55.0;

#[cfg(test)]
mod tests {
    use super::*;

    const PRIORITIES: [KeywordPriority; 5] = [
        KeywordPriority::Title,
        KeywordPriority::Required,
        KeywordPriority::Responsibilities,
        KeywordPriority::NiceToHave,
        KeywordPriority::General,
    ];

    #[test]
    fn test_base_points_decrease_with_weaker_match() {
        for p in PRIORITIES {
            let exact = keyword_base_points(p, MatchType::Exact);
            let stem = keyword_base_points(p, MatchType::Stem);
            let synonym = keyword_base_points(p, MatchType::Synonym);
            assert!(exact > stem && stem > synonym, "{p:?} not ordered");
        }
    }

    #[test]
    fn test_base_points_decrease_with_lower_priority() {
        for pair in PRIORITIES.windows(2) {
            assert!(
                keyword_base_points(pair[0], MatchType::Exact)
                    > keyword_base_points(pair[1], MatchType::Exact)
            );
            assert!(zone_rank_weight(pair[0]) > zone_rank_weight(pair[1]));
        }
    }

    #[test]
    fn test_sub_caps_add_up() {
        assert_eq!(SKILLS_COVERAGE_CAP + SKILLS_ALIGNMENT_CAP + SKILLS_BREADTH_CAP, SKILLS_QUALITY_CAP);
        assert_eq!(EXACT_RATIO_CAP + DENSITY_CAP + COMPLETENESS_CAP, MATCH_QUALITY_CAP);
        assert_eq!(YEARS_CAP_IC + DEPTH_CAP + TITLE_MATCH_CAP + EDUCATION_CAP, EXPERIENCE_CAP);
        assert_eq!(
            YEARS_CAP_MANAGEMENT + TEAM_SIZE_CAP + TITLE_MATCH_CAP + EDUCATION_CAP,
            EXPERIENCE_CAP
        );
    }
}
