use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ats::extractor::extract_keywords;
use crate::ats::matcher::match_keywords;
use crate::ats::metrics::assess;
use crate::ats::models::{Assessment, AtsScore, ExtractedKeywords, MatchResult, ResumeData};
use crate::ats::scoring::build_recommendation;
use crate::errors::AppError;
use crate::state::AppState;

/// Keyword lists accepted by the match endpoint, relative to `max_keywords`.
const MATCH_KEYWORDS_FACTOR: usize = 10;

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job_description: String,
    #[serde(default)]
    pub max_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub keywords: Vec<String>,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_description: String,
    pub resume_text: String,
    #[serde(default)]
    pub resume_data: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: AtsScore,
    pub assessment: Assessment,
    pub recommendation: String,
}

/// POST /api/v1/ats/keywords
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    payload: Result<Json<KeywordsRequest>, JsonRejection>,
) -> Result<Json<ExtractedKeywords>, AppError> {
    let Json(req) = payload?;
    if let Some(n) = req.max_count {
        let max = state.config.max_keywords;
        if n == 0 || n > max {
            return Err(AppError::Validation(format!(
                "max_count must be between 1 and {max}, got {n}"
            )));
        }
    }
    Ok(Json(extract_keywords(&req.job_description, req.max_count)))
}

/// POST /api/v1/ats/match
pub async fn handle_match_keywords(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let Json(req) = payload?;
    let max = state.config.max_keywords * MATCH_KEYWORDS_FACTOR;
    if req.keywords.len() > max {
        return Err(AppError::Validation(format!(
            "at most {max} keywords may be matched per request, got {}",
            req.keywords.len()
        )));
    }
    Ok(Json(match_keywords(&req.keywords, &req.resume_text)))
}

/// POST /api/v1/ats/score
///
/// Scoring is CPU-bound, so it runs on the blocking pool.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(req) = payload?;
    let scorer = state.scorer.clone();

    let score = tokio::task::spawn_blocking(move || {
        scorer.score(&req.job_description, &req.resume_text, &req.resume_data)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?;

    tracing::info!(
        total = score.total,
        matched = score.details.matched_keywords.len(),
        missing = score.details.missing_keywords.len(),
        "ats score computed"
    );

    Ok(Json(ScoreResponse {
        assessment: assess(score.total),
        recommendation: build_recommendation(&score),
        score,
    }))
}
