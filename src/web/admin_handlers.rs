// src/web/admin_handlers.rs
use crate::{
    error::AppResult,
    models::report::FeedbackReport,
    services::report_service,
    state::AppState,
    templates::AdminPage,
    web::mw_admin::AdminUser, // Posto por require_admin
};
use askama::Template;
use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse},
    Json,
};

// --- Painel (GET /admin) ---

/// Página do painel com totais, percentagens e a lista de registos.
/// Protegido por `require_admin`.
pub async fn admin_page(
    State(state): State<AppState>,
    Extension(AdminUser(admin_user)): Extension<AdminUser>, // Admin da sessão
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /admin: relatório pedido por {}", admin_user);

    // Relatório completo (registos por data/hora DESC)
    let report = report_service::admin_report(&state.db).await?;

    // Renderiza o template
    let template = AdminPage::new(admin_user, report);
    Ok(Html(template.render()?))
}

// --- Relatório em JSON (GET /api/report) ---

/// Mesmo relatório do painel, para o script da página.
pub async fn api_report(State(state): State<AppState>) -> AppResult<Json<FeedbackReport>> {
    Ok(Json(report_service::admin_report(&state.db).await?))
}
