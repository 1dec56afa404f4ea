// src/models/admin.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Chave da sessão onde fica o username do admin autenticado.
pub const ADMIN_SESSION_KEY: &str = "admin_user";

/// Linha da tabela `admins`. `senha` guarda um hash bcrypt.
#[derive(Debug, Clone, FromRow)]
pub struct AdminCredential {
    pub username: String,
    pub senha: String,
}

// Corpo JSON de POST /login. Campos opcionais para devolver 400 em vez de 422.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
}

impl LoginPayload {
    /// Devolve (username, senha) se ambos vierem preenchidos.
    pub fn campos(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let senha = self.senha.as_deref().filter(|s| !s.is_empty())?;
        Some((username, senha))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub mensagem: String,
}

impl LoginResponse {
    pub fn sucesso(mensagem: &str) -> Self {
        Self { success: true, mensagem: mensagem.to_string() }
    }

    pub fn falha(mensagem: &str) -> Self {
        Self { success: false, mensagem: mensagem.to_string() }
    }
}
