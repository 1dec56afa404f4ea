// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Chave para assinar o cookie de sessão (mínimo 64 bytes).
    pub session_secret: Option<String>,
    /// Custo bcrypt usado ao semear os admins.
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual a `from_env`, mas com uma fonte de variáveis injetável.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| AppError::ConfigError(format!("BIND_ADDR inválido '{}': {}", bind_raw, e)))?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|c| (4..=31).contains(c))
                .ok_or_else(|| AppError::ConfigError(format!("BCRYPT_COST inválido: {}", raw)))?,
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database_url,
            bind_addr,
            session_secret: lookup("SESSION_SECRET").filter(|s| !s.is_empty()),
            bcrypt_cost,
        })
    }
}
