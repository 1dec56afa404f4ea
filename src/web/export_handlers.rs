// src/web/export_handlers.rs
use crate::{
    error::AppResult,
    services::export_service::{self, ExportFormat},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

// --- Exportação (GET /exportar/{formato}) ---

/// Devolve todos os registos como anexo em csv, txt ou json.
pub async fn handle_exportar(
    State(state): State<AppState>,
    Path(formato): Path<String>, // "csv" | "txt" | "json"
) -> AppResult<impl IntoResponse> {
    // Formato desconhecido -> 400 "Formato inválido."
    let formato: ExportFormat = formato.parse()?;
    tracing::debug!("GET /exportar: formato {:?}", formato);

    let body = export_service::exportar(&state.db, formato).await?;

    // Cabeçalhos de download
    Ok((
        [
            (header::CONTENT_TYPE, formato.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", formato.filename()),
            ),
        ],
        body,
    ))
}
