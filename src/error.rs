// src/error.rs
use crate::models::admin::LoginResponse;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de configuração: {0}")]
    ConfigError(String),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro ao serializar dados: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Usuário ou senha ausentes")]
    MissingLoginFields,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Formato de exportação inválido: {0}")]
    InvalidExportFormat(String),

    #[error("Não autorizado")]
    Unauthorized,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Erros do cliente não precisam de nível "error" no log
        match &self {
            AppError::MissingLoginFields
            | AppError::InvalidCredentials
            | AppError::InvalidExportFormat(_)
            | AppError::Unauthorized => tracing::debug!("Erro de cliente: {:?}", self),
            _ => tracing::error!("Erro processado: {:?}", self),
        }

        let (status, user_message) = match self {
            AppError::MissingLoginFields => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(LoginResponse::falha("Informe usuário e senha.")),
                )
                    .into_response();
            }
            // Mensagem genérica: não distingue usuário inexistente de senha errada
            AppError::InvalidCredentials => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(LoginResponse::falha("Usuário ou senha inválidos.")),
                )
                    .into_response();
            }
            AppError::InvalidExportFormat(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    "Formato inválido.",
                )
                    .into_response();
            }
            AppError::Unauthorized => return Redirect::to("/").into_response(),
            AppError::SqlxError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.")
            }
            AppError::ConfigError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado."),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/">Voltar</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
