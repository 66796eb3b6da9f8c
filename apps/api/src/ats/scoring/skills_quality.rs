//! Skills Quality (0 – 25): required coverage (≤12) + JD alignment (≤8) + breadth (≤5).
//!
//! Skills the keyword matcher already rewarded earn partial credit here so the
//! same evidence is not counted twice at full weight.

use std::collections::HashSet;

use crate::ats::models::{ExtractedKeywords, KeywordPriority, MatchResult, ResumeData};
use crate::ats::policy::{
    ALIGNMENT_PRIORITY_WEIGHT, ALIGNMENT_TOP_KEYWORDS, ALREADY_CREDITED_FACTOR,
    BREADTH_POINTS_PER_SKILL, SKILLS_ALIGNMENT_CAP, SKILLS_BREADTH_CAP, SKILLS_COVERAGE_CAP,
    SKILLS_QUALITY_CAP,
};
use crate::ats::tokenizer::{contains_term, normalize_text};
use crate::ats::vocabulary::synonyms_for;

/// Normalized resume skill terms: flat and categorized items plus category names.
pub struct SkillSet {
    items: Vec<String>,
    categories: Vec<String>,
}

impl SkillSet {
    pub fn from_resume(resume: &ResumeData) -> Self {
        let mut seen = HashSet::new();
        let items = resume
            .skills
            .iter()
            .chain(resume.skills_by_category.iter().flat_map(|c| c.items.iter()))
            .map(|s| normalize_text(s))
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
        let categories = resume
            .skills_by_category
            .iter()
            .map(|c| normalize_text(&c.category))
            .filter(|c| !c.is_empty() && seen.insert(c.clone()))
            .collect();
        Self { items, categories }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.categories.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        let term = normalize_text(keyword);
        !term.is_empty()
            && self
                .items
                .iter()
                .chain(&self.categories)
                .any(|skill| covers(skill, &term))
    }
}

/// Whether one skill entry evidences the normalized term, directly or via a synonym.
fn covers(skill: &str, term: &str) -> bool {
    contains_term(skill, term)
        || synonyms_for(term)
            .iter()
            .any(|variant| contains_term(skill, variant))
}

fn credit(keyword: &str, matches: &MatchResult) -> f64 {
    if matches.is_matched(keyword) {
        ALREADY_CREDITED_FACTOR
    } else {
        1.0
    }
}

fn required_coverage(targets: &[String], skills: &SkillSet, matches: &MatchResult) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let earned: f64 = targets
        .iter()
        .filter(|t| skills.contains(t.as_str()))
        .map(|t| credit(t, matches))
        .sum();
    earned / targets.len() as f64 * SKILLS_COVERAGE_CAP
}

fn jd_alignment(
    top: &[String],
    extracted: &ExtractedKeywords,
    skills: &SkillSet,
    matches: &MatchResult,
) -> f64 {
    let weight = |k: &str| match extracted.priority_of(k) {
        KeywordPriority::Title | KeywordPriority::Required => ALIGNMENT_PRIORITY_WEIGHT,
        _ => 1.0,
    };
    let total: f64 = top.iter().map(|k| weight(k.as_str())).sum();
    if total == 0.0 {
        return 0.0;
    }
    let earned: f64 = top
        .iter()
        .filter(|k| skills.contains(k.as_str()))
        .map(|k| weight(k.as_str()) * credit(k, matches))
        .sum();
    earned / total * SKILLS_ALIGNMENT_CAP
}

/// Skill items that evidence none of the counted keywords.
fn breadth(counted: &[String], skills: &SkillSet) -> f64 {
    let terms: Vec<String> = counted.iter().map(|k| normalize_text(k)).collect();
    let extra = skills
        .items
        .iter()
        .filter(|skill| !terms.iter().any(|t| !t.is_empty() && covers(skill, t)))
        .count();
    (extra as f64 * BREADTH_POINTS_PER_SKILL).min(SKILLS_BREADTH_CAP)
}

pub fn score_skills_quality(
    extracted: &ExtractedKeywords,
    matches: &MatchResult,
    resume: &ResumeData,
) -> f64 {
    let skills = SkillSet::from_resume(resume);
    if skills.is_empty() {
        return 0.0;
    }

    let targets: &[String] = if extracted.technologies.is_empty() {
        &extracted.from_required
    } else {
        &extracted.technologies
    };
    let top: Vec<String> = extracted
        .all
        .iter()
        .take(ALIGNMENT_TOP_KEYWORDS)
        .cloned()
        .collect();

    let coverage = required_coverage(targets, &skills, matches);
    let alignment = jd_alignment(&top, extracted, &skills, matches);

    let counted: Vec<String> = targets.iter().chain(&top).cloned().collect();
    let extra = breadth(&counted, &skills);

    (coverage + alignment + extra).min(SKILLS_QUALITY_CAP)
}
