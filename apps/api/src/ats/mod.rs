// ATS engine: keyword extraction, keyword matching, and four-category scoring.
// Pure and synchronous. No I/O and no shared mutable state; vocabularies are
// process-wide constants initialized on first use.

pub mod extractor;
pub mod handlers;
pub mod matcher;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod scoring;
pub mod tokenizer;
pub mod vocabulary;

pub use extractor::{dynamic_keyword_count, extract_keywords};
pub use matcher::{find_match, match_keywords};
pub use metrics::{
    assess, keyword_density, keyword_occurrences, match_rate, occurrence_density,
    round_one_decimal, word_count,
};
pub use models::{
    Assessment, AtsScore, ExtractedKeywords, KeywordPriority, MatchDetail, MatchResult,
    MatchType, ResumeData, ScoreBreakdown, ScoreDetails,
};
pub use scoring::{build_recommendation, calculate_score, AtsScorer, KeywordAtsScorer};
