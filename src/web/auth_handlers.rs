// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::admin::{LoginPayload, LoginResponse, ADMIN_SESSION_KEY},
    services::auth_service,
    state::AppState,
};
use axum::{extract::State, response::Redirect, Json};
use tower_sessions::Session;

// --- Login (POST /login) ---

/// Valida as credenciais e marca a sessão como autenticada.
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,                    // Sessão tower-sessions
    Json(payload): Json<LoginPayload>, // {"username", "senha"}
) -> AppResult<Json<LoginResponse>> {
    // Campos em falta ou vazios -> 400
    let (username, senha) = payload.campos().ok_or(AppError::MissingLoginFields)?;
    tracing::info!("Tentativa de login para: {}", username);

    // Utilizador inexistente e senha errada dão a mesma resposta (401)
    if !auth_service::authenticate(&state.db, username, senha).await? {
        tracing::warn!("Login recusado para: {}", username);
        return Err(AppError::InvalidCredentials);
    }

    // Novo ID de sessão antes de marcar como autenticada
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(ADMIN_SESSION_KEY, username)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

    tracing::info!("✅ Login bem-sucedido para: {}", username);
    Ok(Json(LoginResponse::sucesso("Login realizado com sucesso.")))
}

// --- Logout (GET /logout) ---

/// Apaga a sessão e volta à página pública.
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    // Só para o log
    let admin_user: Option<String> = session.get(ADMIN_SESSION_KEY).await.ok().flatten();

    // Funciona mesmo sem sessão ativa
    session
        .flush()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match admin_user {
        Some(username) => tracing::info!("🚪 Admin '{}' desligado.", username),
        None => tracing::debug!("🚪 Logout sem sessão ativa."),
    }

    Ok(Redirect::to("/"))
}
