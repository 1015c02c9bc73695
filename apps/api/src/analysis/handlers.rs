//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::suggestions::Suggestion;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_id: Uuid,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub resume_id: Uuid,
    pub ats_score: u8,
    pub keyword_matches: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub format_issues: Vec<String>,
}

/// POST /api/analyze
///
/// Scores a stored resume against a job description. An unknown resume is a
/// hard 404; generator trouble only degrades keywords and suggestions.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let resume = state
        .store
        .get(request.resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", request.resume_id)))?;

    let result = state
        .analyzer
        .analyze(&resume.parsed.text, &request.job_description)
        .await;

    Ok(Json(AnalysisResponse {
        resume_id: request.resume_id,
        ats_score: result.score,
        keyword_matches: result.matched_keywords,
        missing_keywords: result.missing_keywords,
        suggestions: result.suggestions,
        format_issues: result.format_issues,
    }))
}
