//! Data models shared by the extractor, matcher, and category scorers.
//!
//! Every value here is built once per call and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Zone of the job description a keyword was graded from.
/// Declaration order is precedence order: earlier variants outrank later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordPriority {
    Title,
    Required,
    Responsibilities,
    NiceToHave,
    General,
}

/// Ranked keyword inventory parsed out of a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedKeywords {
    /// Deduplicated keywords, most significant first.
    pub all: Vec<String>,
    pub from_title: Vec<String>,
    pub from_required: Vec<String>,
    pub from_nice_to_have: Vec<String>,
    /// Every technology named anywhere in the description, first occurrence first.
    pub technologies: Vec<String>,
    pub action_verbs: Vec<String>,
    pub keyword_priority: BTreeMap<String, KeywordPriority>,
    pub keyword_frequency: BTreeMap<String, u32>,
}

impl ExtractedKeywords {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Priority of a keyword, `General` when the keyword was not extracted.
    pub fn priority_of(&self, keyword: &str) -> KeywordPriority {
        self.keyword_priority
            .get(keyword)
            .copied()
            .unwrap_or(KeywordPriority::General)
    }

    /// Job-description frequency of a keyword, at least 1.
    pub fn frequency_of(&self, keyword: &str) -> u32 {
        self.keyword_frequency
            .get(keyword)
            .copied()
            .unwrap_or(1)
            .max(1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

/// How a keyword was found in the resume. Variant order is tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Stem,
    Synonym,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub keyword: String,
    pub match_type: MatchType,
    /// Resume fragment that satisfied a stem or synonym match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_as: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub match_details: Vec<MatchDetail>,
}

impl MatchResult {
    pub fn detail_for(&self, keyword: &str) -> Option<&MatchDetail> {
        self.match_details.iter().find(|d| d.keyword == keyword)
    }

    pub fn is_matched(&self, keyword: &str) -> bool {
        self.detail_for(keyword).is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume record (externally supplied, read-only)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
}

/// Structured resume record. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub title: Option<String>,
    pub years_experience: Option<f64>,
    pub skills: Vec<String>,
    pub skills_by_category: Vec<SkillCategory>,
    /// Free text such as "led a team of 12".
    pub team_size: Option<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl ResumeData {
    pub fn title_text(&self) -> &str {
        self.title.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn has_skills(&self) -> bool {
        self.skills.iter().any(|s| !s.trim().is_empty())
            || self
                .skills_by_category
                .iter()
                .any(|c| c.items.iter().any(|s| !s.trim().is_empty()))
    }

    pub fn has_highlighted_experience(&self) -> bool {
        self.experiences
            .iter()
            .any(|e| e.highlights.iter().any(|h| !h.trim().is_empty()))
    }

    pub fn has_education(&self) -> bool {
        self.education.iter().any(|e| !e.degree.trim().is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Score
// ────────────────────────────────────────────────────────────────────────────

/// Category scores, each rounded to one decimal.
/// Caps: keyword_relevance 45, skills_quality 25, experience_alignment 20, match_quality 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_relevance: f64,
    pub skills_quality: f64,
    pub experience_alignment: f64,
    pub match_quality: f64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.keyword_relevance + self.skills_quality + self.experience_alignment + self.match_quality
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Occurrence-based keyword density of the resume text, in percent.
    pub keyword_density: f64,
    /// Matched keywords as a percentage of extracted keywords.
    pub match_rate: f64,
    pub extracted_keywords: ExtractedKeywords,
    pub match_details: Vec<MatchDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    /// 0 – 100
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub details: ScoreDetails,
}

/// Human-readable bucket for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl Assessment {
    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Excellent => "Excellent",
            Assessment::Good => "Good",
            Assessment::Fair => "Fair",
            Assessment::Weak => "Weak",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_follows_zone_precedence() {
        assert!(KeywordPriority::Title < KeywordPriority::Required);
        assert!(KeywordPriority::Required < KeywordPriority::Responsibilities);
        assert!(KeywordPriority::Responsibilities < KeywordPriority::NiceToHave);
        assert!(KeywordPriority::NiceToHave < KeywordPriority::General);
    }

    #[test]
    fn test_priority_serde_snake_case() {
        let json = serde_json::to_string(&KeywordPriority::NiceToHave).unwrap();
        assert_eq!(json, r#""nice_to_have""#);
        let parsed: MatchType = serde_json::from_str(r#""synonym""#).unwrap();
        assert_eq!(parsed, MatchType::Synonym);
    }

    #[test]
    fn test_resume_data_deserializes_with_missing_fields() {
        let data: ResumeData = serde_json::from_str(r#"{"title": "Backend Engineer"}"#).unwrap();
        assert_eq!(data.title_text(), "Backend Engineer");
        assert!(data.years_experience.is_none());
        assert!(data.skills.is_empty());
        assert!(!data.has_skills());
        assert!(!data.has_education());
    }

    #[test]
    fn test_frequency_of_unknown_keyword_is_one() {
        let extracted = ExtractedKeywords::default();
        assert_eq!(extracted.frequency_of("rust"), 1);
        assert_eq!(extracted.priority_of("rust"), KeywordPriority::General);
    }

    #[test]
    fn test_match_detail_omits_matched_as_for_exact() {
        let detail = MatchDetail {
            keyword: "python".to_string(),
            match_type: MatchType::Exact,
            matched_as: None,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("matched_as").is_none());
        assert_eq!(json["match_type"], "exact");
    }
}
