// src/web/mw_admin.rs
use crate::{error::AppError, models::admin::ADMIN_SESSION_KEY};
use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

/// Username do admin autenticado, posto nas extensões por `require_admin`.
#[derive(Clone, Debug)]
pub struct AdminUser(pub String);

/// Só deixa passar sessões com `admin_user`. Não volta a validar a senha.
/// Sem sessão, `AppError::Unauthorized` vira um redirecionamento para `/`.
pub async fn require_admin(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<String>(ADMIN_SESSION_KEY).await {
        Ok(Some(username)) => {
            tracing::debug!("Admin MW: sessão de '{}' aceite.", username);
            request.extensions_mut().insert(AdminUser(username));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Admin MW: sem sessão de admin, redirecionando para /");
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Admin MW: erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}
