//! Axum route handlers for the Resume API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{render, ExportFormat};
use crate::models::resume::StoredResume;
use crate::parsing::{parse_document, segment, DocumentFormat, SectionMap};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub filename: String,
    pub text_content: String,
    pub sections: SectionMap,
    pub images_detected: usize,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume_id: Uuid,
    pub filename: String,
    pub text_content: String,
    pub sections: SectionMap,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    pub text_content: String,
    /// Re-derived from `text_content` when omitted.
    pub sections: Option<SectionMap>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResumeResponse {
    pub resume_id: Uuid,
    pub message: String,
    pub text_content: String,
    pub sections: SectionMap,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

/// `<id> (<filename>, <format>, <n> bytes, <n> chars, <n> images)`
fn upload_summary(resume: &StoredResume) -> String {
    format!(
        "{} ({}, {}, {} bytes, {} chars, {} images)",
        resume.id,
        resume.filename,
        resume.format.extension(),
        resume.original.len(),
        resume.parsed.text.len(),
        resume.parsed.images_count
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload
///
/// Accepts a PDF or DOCX in the multipart field `file`, extracts and segments
/// its text, and stores it under a fresh id.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field has no filename".to_string()))?;
        let format = DocumentFormat::from_filename(&filename)?;
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, format, data));
        break;
    }

    let (filename, format, data) = upload
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let max_bytes = state.config.max_file_size_bytes;
    if data.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File too large. Max size: {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    let bytes = data.clone();
    let parsed = tokio::task::spawn_blocking(move || parse_document(format, &bytes))
        .await
        .context("document parser task failed")??;

    let resume = StoredResume::new(filename, format, data, parsed);
    info!("Stored resume {}", upload_summary(&resume));

    let response = UploadResponse {
        resume_id: resume.id,
        filename: resume.filename.clone(),
        text_content: resume.parsed.text.clone(),
        sections: resume.parsed.sections.clone(),
        images_detected: resume.parsed.images_count,
    };
    state.store.put(resume).await;

    Ok(Json(response))
}

/// GET /api/resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(Json(ResumeResponse {
        resume_id: resume.id,
        filename: resume.filename,
        text_content: resume.parsed.text,
        sections: resume.parsed.sections,
    }))
}

/// PUT /api/resume/:id
///
/// Replaces the stored text and sections wholesale.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<UpdateResumeResponse>, AppError> {
    let sections = request
        .sections
        .unwrap_or_else(|| segment(&request.text_content));

    let updated = state
        .store
        .update_content(id, request.text_content, sections)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(Json(UpdateResumeResponse {
        resume_id: updated.id,
        message: "Resume updated successfully".to_string(),
        text_content: updated.parsed.text,
        sections: updated.parsed.sections,
    }))
}

/// GET /api/export/:id/:format
///
/// Renders the current resume content as a `docx` or `pdf` attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resume = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    let format: ExportFormat = format.parse().map_err(AppError::Validation)?;

    let parsed = resume.parsed;
    let bytes = tokio::task::spawn_blocking(move || render(format, &parsed))
        .await
        .context("export task failed")??;
    info!("Exported resume {id} as {} ({} bytes)", format.extension(), bytes.len());

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"resume_optimized.{}\"",
                format.extension()
            ),
        ),
    ];
    Ok((headers, bytes))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::parsing::ParsedDocument;

    #[test]
    fn test_upload_summary_reads_format_then_size() {
        let resume = StoredResume::new(
            "cv.pdf".to_string(),
            DocumentFormat::Pdf,
            Bytes::from(vec![0u8; 1234]),
            ParsedDocument::from_text("Jane Doe", 2),
        );
        let summary = upload_summary(&resume);
        assert_eq!(
            summary,
            format!("{} (cv.pdf, pdf, 1234 bytes, 8 chars, 2 images)", resume.id)
        );
    }
}
