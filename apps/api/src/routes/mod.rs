pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::resume::handlers as resume;
use crate::rewrite::handlers as rewrite;
use crate::state::AppState;

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume lifecycle
        .route(
            "/api/upload",
            post(resume::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/resume/:id",
            get(resume::handle_get_resume).put(resume::handle_update_resume),
        )
        .route("/api/export/:id/:format", get(resume::handle_export))
        // Analysis
        .route("/api/analyze", post(analysis::handle_analyze))
        // Rewrite
        .route("/api/rewrite", post(rewrite::handle_rewrite))
        .route("/api/rewrite/bullets", post(rewrite::handle_bullets))
        .route("/api/rewrite/summary", post(rewrite::handle_summary))
        .with_state(state)
}
