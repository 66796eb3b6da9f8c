//! Score aggregation. Runs extraction and matching once, then the four
//! independent category scorers, and assembles the `AtsScore`.
//!
//! `AppState` holds an `Arc<dyn AtsScorer>`; `KeywordAtsScorer` is the default.

pub mod experience;
pub mod keyword_relevance;
pub mod match_quality;
pub mod skills_quality;

use std::collections::HashSet;

use tracing::debug;

use crate::ats::extractor::extract_keywords;
use crate::ats::matcher::{match_against, ResumeIndex};
use crate::ats::metrics::{assess, match_rate, occurrence_density, round_one_decimal};
use crate::ats::models::{
    AtsScore, ExtractedKeywords, MatchResult, ResumeData, ScoreBreakdown, ScoreDetails,
};

pub use experience::score_experience_alignment;
pub use keyword_relevance::score_keyword_relevance;
pub use match_quality::score_match_quality;
pub use skills_quality::score_skills_quality;

/// Missing keywords named in a recommendation.
const RECOMMENDATION_KEYWORDS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Swappable scoring backend. Implementations must be deterministic and total.
pub trait AtsScorer: Send + Sync {
    fn score(&self, job_description: &str, resume_text: &str, resume: &ResumeData) -> AtsScore;

    /// Short identifier reported alongside results.
    fn backend(&self) -> &'static str;
}

/// Keyword-based scorer: pure Rust, no I/O.
pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn score(&self, job_description: &str, resume_text: &str, resume: &ResumeData) -> AtsScore {
        calculate_score(job_description, resume_text, resume)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregator
// ────────────────────────────────────────────────────────────────────────────

/// Full ATS score for one (job description, resume) pair.
///
/// Never fails: a blank job description yields an all-zero score with empty
/// keyword lists, and blank resume text yields a zero breakdown with every
/// extracted keyword reported missing.
pub fn calculate_score(job_description: &str, resume_text: &str, resume: &ResumeData) -> AtsScore {
    if job_description.trim().is_empty() {
        return AtsScore::default();
    }

    let extracted = extract_keywords(job_description, None);
    let index = ResumeIndex::new(resume_text);

    if index.is_empty() {
        let matches = MatchResult {
            missing: extracted.all.clone(),
            ..Default::default()
        };
        return AtsScore {
            total: 0.0,
            breakdown: ScoreBreakdown::default(),
            details: details(extracted, matches, 0.0),
        };
    }

    let matches = match_against(&extracted.all, &index);

    let breakdown = ScoreBreakdown {
        keyword_relevance: round_one_decimal(score_keyword_relevance(
            &extracted,
            &matches,
            resume_text,
            resume,
        )),
        skills_quality: round_one_decimal(score_skills_quality(&extracted, &matches, resume)),
        experience_alignment: round_one_decimal(score_experience_alignment(
            job_description,
            &extracted,
            resume,
        )),
        match_quality: round_one_decimal(score_match_quality(&matches, resume_text, resume)),
    };
    let total = round_one_decimal(breakdown.sum()).clamp(0.0, 100.0);

    debug!(
        total,
        keyword_relevance = breakdown.keyword_relevance,
        skills_quality = breakdown.skills_quality,
        experience_alignment = breakdown.experience_alignment,
        match_quality = breakdown.match_quality,
        matched = matches.matched.len(),
        missing = matches.missing.len(),
        "calculated ats score"
    );

    let density = round_one_decimal(occurrence_density(&matches.matched, resume_text));
    AtsScore {
        total,
        breakdown,
        details: details(extracted, matches, density),
    }
}

fn details(
    extracted: ExtractedKeywords,
    matches: MatchResult,
    keyword_density: f64,
) -> ScoreDetails {
    let rate = round_one_decimal(match_rate(matches.matched.len(), extracted.all.len()));
    ScoreDetails {
        matched_keywords: matches.matched,
        missing_keywords: matches.missing,
        keyword_density,
        match_rate: rate,
        extracted_keywords: extracted,
        match_details: matches.match_details,
    }
}

/// One sentence naming the assessment and the most important missing keywords.
pub fn build_recommendation(score: &AtsScore) -> String {
    let assessment = assess(score.total);
    let headline = format!("{} match ({:.1}/100).", assessment.label(), score.total);

    let extracted = &score.details.extracted_keywords;
    let mut seen = HashSet::new();
    let mut missing: Vec<&String> = score
        .details
        .missing_keywords
        .iter()
        .filter(|k| seen.insert(k.as_str()))
        .collect();
    // stable: keeps extraction order within a priority
    missing.sort_by_key(|k| extracted.priority_of(k));
    let top: Vec<&str> = missing
        .into_iter()
        .take(RECOMMENDATION_KEYWORDS)
        .map(String::as_str)
        .collect();

    if top.is_empty() {
        if extracted.is_empty() {
            format!("{headline} No keywords could be extracted from the job description.")
        } else {
            format!("{headline} Every extracted keyword is covered.")
        }
    } else {
        format!("{headline} Add evidence for: {}.", top.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::models::{
        Assessment, EducationEntry, ExperienceEntry, KeywordPriority, SkillCategory,
    };
    use crate::ats::policy::{
        EXPERIENCE_CAP, KEYWORD_RELEVANCE_CAP, MATCH_QUALITY_CAP, SKILLS_QUALITY_CAP,
    };

    const JD: &str = "Senior Backend Engineer\n\
        About us: we run payments infrastructure.\n\
        Responsibilities:\n\
        - Design and build distributed services\n\
        - Mentor engineers and review code\n\
        Requirements:\n\
        - 5+ years of experience with Rust or Go\n\
        - PostgreSQL, Kubernetes, Docker, AWS\n\
        - Bachelor's degree in Computer Science\n\
        Nice to have:\n\
        - Kafka, Terraform";

    const RESUME_TEXT: &str = "Senior Backend Engineer\n\
        Backend engineer building distributed payments services in Rust.\n\
        Designed PostgreSQL schemas and deployed to Kubernetes with Docker on AWS.\n\
        Mentored engineers and reviewed code.";

    fn resume() -> ResumeData {
        ResumeData {
            title: Some("Senior Backend Engineer".into()),
            years_experience: Some(6.0),
            skills: vec!["Rust".into(), "PostgreSQL".into(), "Docker".into()],
            skills_by_category: vec![SkillCategory {
                category: "Cloud".into(),
                items: vec!["AWS".into(), "Kubernetes".into()],
            }],
            team_size: None,
            experiences: vec![
                ExperienceEntry {
                    title: "Backend Engineer".into(),
                    company: "Acme Pay".into(),
                    highlights: vec!["Built distributed payments services in Rust".into()],
                },
                ExperienceEntry {
                    title: "Software Engineer".into(),
                    company: "Initech".into(),
                    highlights: vec!["Designed PostgreSQL schemas".into()],
                },
            ],
            education: vec![EducationEntry {
                degree: "BS Computer Science".into(),
                institution: "State University".into(),
            }],
        }
    }

    fn assert_bounded(score: &AtsScore) {
        let b = &score.breakdown;
        assert!((0.0..=KEYWORD_RELEVANCE_CAP).contains(&b.keyword_relevance));
        assert!((0.0..=SKILLS_QUALITY_CAP).contains(&b.skills_quality));
        assert!((0.0..=EXPERIENCE_CAP).contains(&b.experience_alignment));
        assert!((0.0..=MATCH_QUALITY_CAP).contains(&b.match_quality));
        assert!((0.0..=100.0).contains(&score.total));
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        for jd in ["", "   \n\t "] {
            let score = calculate_score(jd, RESUME_TEXT, &resume());
            assert_eq!(score, AtsScore::default());
            assert!(score.details.extracted_keywords.all.is_empty());
        }
    }

    #[test]
    fn test_blank_resume_text_reports_everything_missing() {
        let score = calculate_score(JD, "  ", &resume());
        assert_eq!(score.total, 0.0);
        assert_eq!(score.breakdown, ScoreBreakdown::default());
        assert!(score.details.matched_keywords.is_empty());
        assert_eq!(score.details.missing_keywords, score.details.extracted_keywords.all);
        assert!(!score.details.missing_keywords.is_empty());
        assert_eq!(score.details.match_rate, 0.0);
    }

    #[test]
    fn test_strong_resume_scores_well_and_is_bounded() {
        let score = calculate_score(JD, RESUME_TEXT, &resume());
        assert_bounded(&score);
        assert!(score.total > 50.0, "total was {}", score.total);
        assert!(score.details.matched_keywords.contains(&"rust".to_string()));
        assert!(score.details.matched_keywords.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_total_equals_sum_of_rounded_categories() {
        let score = calculate_score(JD, RESUME_TEXT, &resume());
        let expected = round_one_decimal(score.breakdown.sum());
        assert_eq!(score.total, expected);
        for v in [
            score.breakdown.keyword_relevance,
            score.breakdown.skills_quality,
            score.breakdown.experience_alignment,
            score.breakdown.match_quality,
        ] {
            assert_eq!(v, round_one_decimal(v), "{v} is not rounded to one decimal");
        }
    }

    #[test]
    fn test_matched_and_missing_partition_the_keywords() {
        let score = calculate_score(JD, RESUME_TEXT, &resume());
        let d = &score.details;
        assert_eq!(
            d.matched_keywords.len() + d.missing_keywords.len(),
            d.extracted_keywords.all.len()
        );
        assert_eq!(d.match_details.len(), d.matched_keywords.len());
        for k in &d.matched_keywords {
            assert!(!d.missing_keywords.contains(k), "{k} both matched and missing");
        }
    }

    #[test]
    fn test_deterministic_over_repeated_runs() {
        let first = calculate_score(JD, RESUME_TEXT, &resume());
        let first_json = serde_json::to_string(&first).unwrap();
        for _ in 0..10 {
            let again = calculate_score(JD, RESUME_TEXT, &resume());
            assert_eq!(again, first);
            assert_eq!(serde_json::to_string(&again).unwrap(), first_json);
        }
    }

    #[test]
    fn test_synonym_scenario_partial_credit() {
        let jd = "Platform Engineer\nRequirements: Python, AWS, Kubernetes";
        let text = "Built data pipelines in Python and ran them on k8s.";
        let score = calculate_score(jd, text, &ResumeData::default());
        assert!(score.details.matched_keywords.contains(&"python".to_string()));
        assert!(score.details.matched_keywords.contains(&"kubernetes".to_string()));
        assert!(score.details.missing_keywords.contains(&"aws".to_string()));
        assert!(score.breakdown.keyword_relevance > 0.0);
        assert_bounded(&score);
    }

    #[test]
    fn test_adding_a_missing_keyword_never_lowers_relevance() {
        let base = calculate_score(JD, RESUME_TEXT, &resume());
        let missing = base.details.missing_keywords.first().expect("fixture leaves gaps");
        let improved_text = format!("{RESUME_TEXT}\nAlso: {missing}.");
        let improved = calculate_score(JD, &improved_text, &resume());
        assert!(improved.breakdown.keyword_relevance >= base.breakdown.keyword_relevance);
        assert!(improved.details.matched_keywords.len() > base.details.matched_keywords.len());
    }

    #[test]
    fn test_hostile_input_stays_bounded() {
        let mut text = String::from("\u{0}\u{7f}🚀 ");
        for _ in 0..10_000 {
            text.push_str("rust rust kubernetes ünï ");
        }
        let score = calculate_score(JD, &text, &ResumeData::default());
        assert_bounded(&score);
    }

    #[test]
    fn test_trait_object_delegates_to_calculate_score() {
        let scorer: Box<dyn AtsScorer> = Box::new(KeywordAtsScorer);
        assert_eq!(scorer.backend(), "keyword");
        assert_eq!(
            scorer.score(JD, RESUME_TEXT, &resume()),
            calculate_score(JD, RESUME_TEXT, &resume())
        );
    }

    #[test]
    fn test_recommendation_names_priority_keywords_first() {
        let mut score = AtsScore {
            total: 61.24,
            ..Default::default()
        };
        let extracted = &mut score.details.extracted_keywords;
        extracted.all = vec!["kafka".into(), "aws".into(), "terraform".into(), "rust".into()];
        extracted
            .keyword_priority
            .insert("kafka".into(), KeywordPriority::NiceToHave);
        extracted
            .keyword_priority
            .insert("aws".into(), KeywordPriority::Required);
        extracted
            .keyword_priority
            .insert("terraform".into(), KeywordPriority::Required);
        score.details.missing_keywords = vec!["kafka".into(), "aws".into(), "terraform".into()];

        assert_eq!(assess(score.total), Assessment::Fair);
        assert_eq!(
            build_recommendation(&score),
            "Fair match (61.2/100). Add evidence for: aws, terraform, kafka."
        );
    }

    #[test]
    fn test_recommendation_without_missing_keywords() {
        let empty = build_recommendation(&AtsScore::default());
        assert_eq!(
            empty,
            "Weak match (0.0/100). No keywords could be extracted from the job description."
        );

        let mut score = AtsScore {
            total: 90.0,
            ..Default::default()
        };
        score.details.extracted_keywords.all = vec!["rust".into()];
        assert_eq!(
            build_recommendation(&score),
            "Excellent match (90.0/100). Every extracted keyword is covered."
        );
    }
}
