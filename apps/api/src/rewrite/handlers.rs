//! Axum route handlers for the Rewrite API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::rewrite::rewriter::{generate_bullet_points, generate_summary, rewrite_section};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    /// Informational; the text to rewrite travels in `original_text`.
    #[allow(dead_code)]
    pub resume_id: Uuid,
    pub section: String,
    pub original_text: String,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub original: String,
    pub suggested: String,
    pub improvements: Vec<String>,
    pub keywords_added: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulletsRequest {
    pub description: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub target_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulletsResponse {
    pub bullets: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub resume_id: Uuid,
    pub target_role: Option<String>,
    pub years_experience: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /api/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    if request.original_text.trim().is_empty() {
        return Err(AppError::Validation(
            "original_text cannot be empty".to_string(),
        ));
    }

    let result = rewrite_section(
        state.generator.as_ref(),
        &request.original_text,
        &request.section,
        request.job_description.as_deref(),
        state.config.llm_timeout,
    )
    .await;

    Ok(Json(RewriteResponse {
        original: request.original_text,
        suggested: result.text,
        improvements: result.improvements,
        keywords_added: result.keywords_added,
    }))
}

/// POST /api/rewrite/bullets
pub async fn handle_bullets(
    State(state): State<AppState>,
    Json(request): Json<BulletsRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    let bullets = generate_bullet_points(
        state.generator.as_ref(),
        &request.description,
        &request.role,
        &request.company,
        &request.target_keywords,
        state.config.llm_timeout,
    )
    .await;

    Ok(Json(BulletsResponse { bullets }))
}

/// POST /api/rewrite/summary
///
/// Summarises the stored resume text; 404 when the id is unknown.
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let resume = state
        .store
        .get(request.resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", request.resume_id)))?;

    let summary = generate_summary(
        state.generator.as_ref(),
        &resume.parsed.text,
        request.target_role.as_deref(),
        request.years_experience,
        state.config.llm_timeout,
    )
    .await;

    Ok(Json(SummaryResponse { summary }))
}
