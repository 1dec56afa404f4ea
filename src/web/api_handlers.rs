// src/web/api_handlers.rs
use crate::{
    db::FeedbackOrder,
    error::AppResult,
    models::{feedback::FeedbackRecord, report::StatsSummary},
    services::report_service,
    state::AppState,
};
use axum::{extract::State, Json};

// --- Endpoints JSON públicos ---

/// GET /api/feedbacks: todos os registos, mais recente primeiro (id DESC).
pub async fn api_feedbacks(State(state): State<AppState>) -> AppResult<Json<Vec<FeedbackRecord>>> {
    let registros = state.db.list_feedbacks(FeedbackOrder::IdDesc).await?;
    tracing::debug!("GET /api/feedbacks: {} registos", registros.len());
    Ok(Json(registros))
}

/// GET /api/stats: contagens por categoria e total.
pub async fn api_stats(State(state): State<AppState>) -> AppResult<Json<StatsSummary>> {
    Ok(Json(report_service::stats_summary(&state.db).await?))
}
