//! Experience Alignment (0 – 20).
//!
//! Sub-scores depend on the detected role type:
//! - management: years ≤6, team size ≤6, title match ≤5, education ≤3
//! - individual contributor: years ≤9, technical depth ≤3, title match ≤5, education ≤3
//!
//! A resume whose title shares nothing with the job title has the whole
//! sub-total discounted before the final cap.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ats::models::{ExtractedKeywords, ResumeData};
use crate::ats::policy::{
    DEPTH_BROAD_SKILLS, DEPTH_BROAD_SKILL_COUNT, DEPTH_CAP, DEPTH_MULTI_ROLE, DEPTH_SINGLE_ROLE,
    DEPTH_SOME_SKILLS, DOMAIN_MISMATCH_FACTOR, EDUCATION_CAP, EDUCATION_FIELD_BONUS,
    EDUCATION_LEVEL_POINTS, EDUCATION_ONE_SHORT_FACTOR, EXPERIENCE_CAP,
    MANAGEMENT_SIGNAL_MARGIN, OVERQUALIFIED_PENALTY_MAX, OVERQUALIFIED_PENALTY_SLOPE,
    OVERQUALIFIED_RATIO, TEAM_SIZE_CAP, TEAM_SIZE_FLOOR_CREDIT, TEAM_SIZE_TIERS,
    TEAM_SIZE_UNSTATED_CREDIT, TITLE_MATCH_CAP, YEARS_CAP_IC, YEARS_CAP_MANAGEMENT,
    YEARS_DECAY_FACTOR, YEARS_DECAY_FLOOR, YEARS_UNSTATED_CREDIT,
};
use crate::ats::tokenizer::{contains_term, count_term, normalize_text, stem, tokenize};
use crate::ats::vocabulary::{
    AMBIGUOUS_DEGREE_SPELLINGS, DEGREE_CONTEXT_WORDS, DEGREE_LEVELS, IC_SIGNALS,
    MANAGEMENT_SIGNALS, STUDY_FIELDS,
};

static YEARS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(\d{1,2}(?:\.\d)?)\s*(?:\+|plus)?\s*(?:(?:-|–|to)\s*\d{1,2}\s*)?\+?\s*(?:years?|yrs?)\b",
    )
    .expect("valid years pattern")
});

static TEAM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:teams? of|manage|managing|managed|lead|leading|led)\s+(?:a\s+)?(?:team\s+of\s+)?(\d{1,4})\b|\b(\d{1,4})\+?\s*(?:direct reports|reports|engineers|people|developers|person)\b",
    )
    .expect("valid team size pattern")
});

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,5}").expect("valid number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    IndividualContributor,
    Management,
}

/// Sub-score breakdown, kept for transparency and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAlignment {
    pub role_type: RoleType,
    pub years: f64,
    /// Team size for management roles, technical depth for IC roles.
    pub scope: f64,
    pub title_match: f64,
    pub education: f64,
    /// 1.0, or the domain-mismatch discount.
    pub domain_factor: f64,
    pub total: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Role type
// ────────────────────────────────────────────────────────────────────────────

/// Role-signal phrases as token sequences, longest first.
static ROLE_SIGNALS: Lazy<Vec<(Vec<String>, RoleType)>> = Lazy::new(|| {
    let mut signals: Vec<(Vec<String>, RoleType)> = MANAGEMENT_SIGNALS
        .iter()
        .map(|s| (s, RoleType::Management))
        .chain(IC_SIGNALS.iter().map(|s| (s, RoleType::IndividualContributor)))
        .map(|(s, role)| {
            let words: Vec<String> = normalize_text(s).split(' ').map(str::to_string).collect();
            (words, role)
        })
        .collect();
    signals.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    signals
});

/// Distinct (management, IC) signal phrases in the normalized text.
///
/// Phrases match whole words only. Scanning left to right, the longest phrase
/// starting at a word claims its span, so "manager" is never also "manage".
fn count_role_signals(normalized: &str) -> (usize, usize) {
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    let mut found: HashSet<usize> = HashSet::new();
    let mut i = 0;
    while i < tokens.len() {
        let rest = &tokens[i..];
        let hit = ROLE_SIGNALS.iter().enumerate().find(|(_, (words, _))| {
            rest.len() >= words.len() && words.iter().zip(rest).all(|(w, t)| w.as_str() == *t)
        });
        match hit {
            Some((index, (words, _))) => {
                found.insert(index);
                i += words.len();
            }
            None => i += 1,
        }
    }
    let management = found
        .iter()
        .filter(|&&index| ROLE_SIGNALS[index].1 == RoleType::Management)
        .count();
    (management, found.len() - management)
}

/// Management only when its signals exceed IC signals by the configured margin.
pub fn detect_role_type(job_description: &str) -> RoleType {
    let (management, ic) = count_role_signals(&normalize_text(job_description));
    if management >= ic + MANAGEMENT_SIGNAL_MARGIN {
        RoleType::Management
    } else {
        RoleType::IndividualContributor
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Years of experience
// ────────────────────────────────────────────────────────────────────────────

/// First "N years" / "N+ years" / "N-M years" requirement in the description.
/// Fractions ("2.5 years") are kept; ranges use the lower bound.
pub fn required_years(job_description: &str) -> Option<f64> {
    let lowered = job_description.to_lowercase();
    YEARS_PATTERN
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Years sub-score: full cap at or above the requirement (mildly reduced when far
/// above it), smooth exponential decay below it.
pub fn years_score(resume_years: Option<f64>, required: Option<f64>, cap: f64) -> f64 {
    let years = match resume_years {
        Some(y) if y.is_finite() => y.max(0.0),
        _ => return 0.0,
    };
    let required = match required {
        Some(r) if r > 0.0 => r,
        _ => return cap * YEARS_UNSTATED_CREDIT,
    };

    if years >= required {
        let threshold = required * OVERQUALIFIED_RATIO;
        if years > threshold {
            let excess_ratio = (years - threshold) / required;
            let penalty = (excess_ratio * OVERQUALIFIED_PENALTY_SLOPE).min(OVERQUALIFIED_PENALTY_MAX);
            cap * (1.0 - penalty)
        } else {
            cap
        }
    } else {
        let deficit = required - years;
        let scale = (required * YEARS_DECAY_FACTOR).max(YEARS_DECAY_FLOOR);
        cap * (-deficit / scale).exp()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Team size / technical depth
// ────────────────────────────────────────────────────────────────────────────

fn team_size_in(text: &str) -> Option<u32> {
    let lowered = text.to_lowercase();
    TEAM_PATTERN.captures(&lowered).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Team size the candidate claims: the free-text field first, then highlights.
fn resume_team_size(resume: &ResumeData) -> Option<u32> {
    if let Some(text) = resume.team_size.as_deref() {
        if let Some(n) = FIRST_NUMBER
            .find(text)
            .and_then(|m| m.as_str().parse::<u32>().ok())
        {
            return Some(n);
        }
    }
    resume
        .experiences
        .iter()
        .flat_map(|e| e.highlights.iter())
        .find_map(|h| team_size_in(h))
}

pub fn team_size_score(target: Option<u32>, actual: Option<u32>) -> f64 {
    let actual = match actual {
        Some(n) if n > 0 => n as f64,
        _ => return 0.0,
    };
    let target = match target {
        Some(n) if n > 0 => n as f64,
        _ => return TEAM_SIZE_CAP * TEAM_SIZE_UNSTATED_CREDIT,
    };
    let ratio = actual / target;
    let fraction = TEAM_SIZE_TIERS
        .iter()
        .find(|(min_ratio, _)| ratio >= *min_ratio)
        .map(|(_, fraction)| *fraction)
        .unwrap_or(TEAM_SIZE_FLOOR_CREDIT);
    TEAM_SIZE_CAP * fraction
}

pub fn technical_depth_score(resume: &ResumeData) -> f64 {
    let roles = match resume.experiences.len() {
        0 => 0.0,
        1 => DEPTH_SINGLE_ROLE,
        _ => DEPTH_MULTI_ROLE,
    };
    let distinct_skills: HashSet<String> = resume
        .skills
        .iter()
        .chain(resume.skills_by_category.iter().flat_map(|c| c.items.iter()))
        .map(|s| normalize_text(s))
        .filter(|s| !s.is_empty())
        .collect();
    let skills = match distinct_skills.len() {
        0 => 0.0,
        n if n >= DEPTH_BROAD_SKILL_COUNT => DEPTH_BROAD_SKILLS,
        _ => DEPTH_SOME_SKILLS,
    };
    (roles + skills).min(DEPTH_CAP)
}

// ────────────────────────────────────────────────────────────────────────────
// Title match and domain gate
// ────────────────────────────────────────────────────────────────────────────

fn stems_overlap(a: &str, b: &str) -> bool {
    a == b || (a.len() > 3 && b.len() > 3 && (a.contains(b) || b.contains(a)))
}

/// Fraction of title-zone keywords found (exact or stemmed) in the resume title.
pub fn title_match_score(title_keywords: &[String], resume_title: &str) -> f64 {
    let normalized = normalize_text(resume_title);
    if title_keywords.is_empty() || normalized.is_empty() {
        return 0.0;
    }
    let title_stems: Vec<String> = tokenize(&normalized).iter().map(|t| stem(t)).collect();
    let found = title_keywords
        .iter()
        .filter(|kw| {
            let term = normalize_text(kw);
            contains_term(&normalized, &term)
                || title_stems.iter().any(|s| stems_overlap(s, &stem(&term)))
        })
        .count();
    found as f64 / title_keywords.len() as f64 * TITLE_MATCH_CAP
}

/// Whether the resume title shares any stem or substring with the job title keywords.
/// With no job title keywords there is nothing to gate on.
pub fn shares_domain(title_keywords: &[String], resume_title: &str) -> bool {
    if title_keywords.is_empty() {
        return true;
    }
    let resume_stems: Vec<String> = tokenize(resume_title).iter().map(|t| stem(t)).collect();
    title_keywords.iter().any(|kw| {
        let kw_stem = stem(&normalize_text(kw));
        resume_stems.iter().any(|s| stems_overlap(s, &kw_stem))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// Every degree level named in free text such as a resume degree line.
fn degree_levels(text: &str) -> Vec<u8> {
    let normalized = normalize_text(text);
    DEGREE_LEVELS
        .iter()
        .filter(|(spelling, _)| count_term(&normalized, spelling) > 0)
        .map(|(_, level)| *level)
        .collect()
}

/// Degree spelling starting at `tokens[i]`: (level, words spanned, spelling).
fn degree_at(tokens: &[&str], i: usize) -> Option<(u8, usize, &'static str)> {
    let rest = tokens.get(i..)?;
    DEGREE_LEVELS.iter().find_map(|(spelling, level)| {
        let words: Vec<&str> = spelling.split(' ').collect();
        rest.starts_with(&words).then_some((*level, words.len(), *spelling))
    })
}

/// Whether an ambiguous spelling at `tokens[i..i + len]` is used as a degree:
/// followed by a context word ("ms in", "master's degree"), or listed next to
/// another degree ("bs or ms", "bs ms"). "Scrum master" never is.
fn in_degree_context(tokens: &[&str], i: usize, len: usize) -> bool {
    if i > 0 && tokens[i - 1] == "scrum" {
        return false;
    }
    let is_degree = |j: usize| j < tokens.len() && degree_at(tokens, j).is_some();

    let mut next = i + len;
    if tokens.get(next) == Some(&"s") {
        next += 1;
    }
    let followed = match tokens.get(next).copied() {
        Some(word) if DEGREE_CONTEXT_WORDS.contains(&word) => true,
        Some("or") | Some("and") => is_degree(next + 1),
        Some(_) => is_degree(next),
        None => false,
    };
    if followed {
        return true;
    }

    match i.checked_sub(1).map(|p| tokens[p]) {
        Some("or") | Some("and") => i >= 2 && is_degree(i - 2),
        Some(_) => is_degree(i - 1),
        None => false,
    }
}

/// Degree levels a job description asks for.
fn required_degree_levels(job_description: &str) -> Vec<u8> {
    let normalized = normalize_text(job_description);
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    (0..tokens.len())
        .filter_map(|i| {
            let (level, len, spelling) = degree_at(&tokens, i)?;
            let unambiguous = !AMBIGUOUS_DEGREE_SPELLINGS.contains(&spelling);
            (unambiguous || in_degree_context(&tokens, i, len)).then_some(level)
        })
        .collect()
}

fn mentions_study_field(text: &str) -> bool {
    let normalized = normalize_text(text);
    STUDY_FIELDS.iter().any(|f| contains_term(&normalized, f))
}

pub fn education_score(job_description: &str, resume: &ResumeData) -> f64 {
    let resume_level = resume
        .education
        .iter()
        .flat_map(|e| degree_levels(&e.degree))
        .max()
        .unwrap_or(0);
    if resume_level == 0 && !resume.has_education() {
        return 0.0;
    }

    // The lowest level the description mentions is the requirement.
    let required_level = required_degree_levels(job_description).into_iter().min();
    let level_points = match required_level {
        None if resume_level > 0 => EDUCATION_LEVEL_POINTS,
        None => EDUCATION_LEVEL_POINTS * EDUCATION_ONE_SHORT_FACTOR,
        Some(required) if resume_level >= required => EDUCATION_LEVEL_POINTS,
        Some(required) if resume_level > 0 && resume_level + 1 == required => {
            EDUCATION_LEVEL_POINTS * EDUCATION_ONE_SHORT_FACTOR
        }
        Some(_) => 0.0,
    };

    let field_bonus = if mentions_study_field(job_description)
        && resume.education.iter().any(|e| mentions_study_field(&e.degree))
    {
        EDUCATION_FIELD_BONUS
    } else {
        0.0
    };

    (level_points + field_bonus).min(EDUCATION_CAP)
}

// ────────────────────────────────────────────────────────────────────────────
// Category score
// ────────────────────────────────────────────────────────────────────────────

pub fn assess_experience(
    job_description: &str,
    extracted: &ExtractedKeywords,
    resume: &ResumeData,
) -> ExperienceAlignment {
    let role_type = detect_role_type(job_description);
    let required = required_years(job_description);

    let (years, scope) = match role_type {
        RoleType::Management => (
            years_score(resume.years_experience, required, YEARS_CAP_MANAGEMENT),
            team_size_score(team_size_in(job_description), resume_team_size(resume)),
        ),
        RoleType::IndividualContributor => (
            years_score(resume.years_experience, required, YEARS_CAP_IC),
            technical_depth_score(resume),
        ),
    };

    let title_match = title_match_score(&extracted.from_title, resume.title_text());
    let education = education_score(job_description, resume);

    let domain_factor = if shares_domain(&extracted.from_title, resume.title_text()) {
        1.0
    } else {
        DOMAIN_MISMATCH_FACTOR
    };

    let total = ((years + scope + title_match + education) * domain_factor).min(EXPERIENCE_CAP);

    ExperienceAlignment {
        role_type,
        years,
        scope,
        title_match,
        education,
        domain_factor,
        total,
    }
}

pub fn score_experience_alignment(
    job_description: &str,
    extracted: &ExtractedKeywords,
    resume: &ResumeData,
) -> f64 {
    assess_experience(job_description, extracted, resume).total
}
