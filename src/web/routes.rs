// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        admin_handlers, api_handlers, auth_handlers, export_handlers, feedback_handlers, mw_admin,
        realtime_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_cookies::Key;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(feedback_handlers::index_page))
        .route("/registrar", post(feedback_handlers::handle_registrar))
        .route("/login", post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/exportar/{formato}", get(export_handlers::handle_exportar))
        .route("/api/feedbacks", get(api_handlers::api_feedbacks))
        .route("/api/stats", get(api_handlers::api_stats))
        .route("/ws", get(realtime_handlers::realtime_websocket_handler));

    // --- Rotas de Admin --- (sem sessão: redireciona para /)
    let admin_routes = Router::new()
        .route("/admin", get(admin_handlers::admin_page))
        .route("/api/report", get(admin_handlers::api_report))
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(app_state)
}

/// Router completo com trace e sessões, para qualquer store de sessões.
pub fn create_app<S>(app_state: AppState, session_store: S, key: Key) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(key);

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
