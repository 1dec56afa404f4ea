// src/web/feedback_handlers.rs
use crate::{
    error::AppResult,
    models::feedback::{MensagemResponse, RegistrarPayload, CATEGORIAS},
    services::feedback_service,
    state::AppState,
    templates::IndexPage,
};
use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};

// --- Página pública (GET /) ---

/// Serve a página com os três botões de satisfação.
pub async fn index_page() -> AppResult<impl IntoResponse> {
    let template = IndexPage { categorias: &CATEGORIAS };
    Ok(Html(template.render()?))
}

// --- Registo (POST /registrar) ---

/// Grava um feedback e notifica os painéis ligados.
pub async fn handle_registrar(
    State(state): State<AppState>,           // db + hub de tempo real
    Json(payload): Json<RegistrarPayload>, // {"grau": "..."}
) -> AppResult<Json<MensagemResponse>> {
    // Sem validação contra as categorias: o texto é gravado tal como veio
    let grau = payload.grau.unwrap_or_default();
    tracing::debug!("POST /registrar: grau '{}'", grau);

    // Insere, relê e publica new_feedback + stats_update
    feedback_service::registrar(&state.db, &state.realtime, grau).await?;

    Ok(Json(MensagemResponse {
        mensagem: feedback_service::MENSAGEM_OBRIGADO.to_string(),
    }))
}
