//! Match Quality (0 – 10): exact-match ratio (≤4) + density compliance (≤3)
//! + section completeness (≤3).

use crate::ats::metrics::occurrence_density;
use crate::ats::models::{MatchResult, MatchType, ResumeData};
use crate::ats::policy::{
    COMPLETENESS_CAP, COMPLETENESS_PER_SECTION, DENSITY_CAP, DENSITY_CEILING, DENSITY_FLOOR,
    DENSITY_OPTIMAL_HIGH, DENSITY_OPTIMAL_LOW, EXACT_RATIO_CAP, MATCH_QUALITY_CAP,
};

/// Share of matched keywords that matched exactly.
pub fn exact_ratio_score(matches: &MatchResult) -> f64 {
    let total = matches.match_details.len();
    if total == 0 {
        return 0.0;
    }
    let exact = matches
        .match_details
        .iter()
        .filter(|d| d.match_type == MatchType::Exact)
        .count();
    exact as f64 / total as f64 * EXACT_RATIO_CAP
}

/// Full credit inside the optimal band, linear ramps on either side, zero outside the extremes.
pub fn density_score(density: f64) -> f64 {
    if !density.is_finite() || density < DENSITY_FLOOR || density > DENSITY_CEILING {
        0.0
    } else if density < DENSITY_OPTIMAL_LOW {
        DENSITY_CAP * (density - DENSITY_FLOOR) / (DENSITY_OPTIMAL_LOW - DENSITY_FLOOR)
    } else if density <= DENSITY_OPTIMAL_HIGH {
        DENSITY_CAP
    } else {
        DENSITY_CAP * (DENSITY_CEILING - density) / (DENSITY_CEILING - DENSITY_OPTIMAL_HIGH)
    }
}

pub fn completeness_score(resume: &ResumeData) -> f64 {
    let populated = [
        !resume.title_text().is_empty(),
        resume.has_skills(),
        resume.has_highlighted_experience(),
        resume.has_education(),
    ]
    .iter()
    .filter(|present| **present)
    .count();
    (populated as f64 * COMPLETENESS_PER_SECTION).min(COMPLETENESS_CAP)
}

pub fn score_match_quality(matches: &MatchResult, resume_text: &str, resume: &ResumeData) -> f64 {
    let density = occurrence_density(&matches.matched, resume_text);
    let total = exact_ratio_score(matches) + density_score(density) + completeness_score(resume);
    total.min(MATCH_QUALITY_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::matcher::match_keywords;
    use crate::ats::models::{EducationEntry, ExperienceEntry};

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_ratio() {
        let all_exact = match_keywords(&kws(&["rust", "kafka"]), "rust and kafka");
        assert_eq!(exact_ratio_score(&all_exact), EXACT_RATIO_CAP);

        let half = match_keywords(&kws(&["rust", "kubernetes"]), "rust on k8s");
        assert_eq!(exact_ratio_score(&half), EXACT_RATIO_CAP / 2.0);

        assert_eq!(exact_ratio_score(&MatchResult::default()), 0.0);
    }

    #[test]
    fn test_density_band() {
        assert_eq!(density_score(0.0), 0.0);
        assert_eq!(density_score(0.4), 0.0);
        assert_eq!(density_score(2.0), DENSITY_CAP);
        assert_eq!(density_score(2.5), DENSITY_CAP);
        assert_eq!(density_score(3.0), DENSITY_CAP);
        assert_eq!(density_score(7.0), 0.0);
        assert_eq!(density_score(f64::NAN), 0.0);

        let rising = density_score(1.25);
        assert!(rising > 0.0 && rising < DENSITY_CAP);
        let falling = density_score(4.5);
        assert!((falling - DENSITY_CAP / 2.0).abs() < 1e-9, "falling was {falling}");
    }

    #[test]
    fn test_completeness_counts_populated_sections() {
        assert_eq!(completeness_score(&ResumeData::default()), 0.0);
        let full = ResumeData {
            title: Some("Backend Engineer".into()),
            skills: vec!["Rust".into()],
            experiences: vec![ExperienceEntry {
                title: "Engineer".into(),
                company: "Acme".into(),
                highlights: vec!["Built things".into()],
            }],
            education: vec![EducationEntry {
                degree: "BS".into(),
                institution: "U".into(),
            }],
            ..Default::default()
        };
        assert_eq!(completeness_score(&full), COMPLETENESS_CAP);

        let no_highlights = ResumeData {
            experiences: vec![ExperienceEntry::default()],
            ..full.clone()
        };
        assert_eq!(completeness_score(&no_highlights), COMPLETENESS_CAP - COMPLETENESS_PER_SECTION);
    }

    #[test]
    fn test_score_bounded() {
        let text = "rust kafka ".repeat(200);
        let matches = match_keywords(&kws(&["rust", "kafka"]), &text);
        let s = score_match_quality(&matches, &text, &ResumeData::default());
        // everything exact, density far above the ceiling
        assert_eq!(s, EXACT_RATIO_CAP);
        assert!(s <= MATCH_QUALITY_CAP);
    }
}
