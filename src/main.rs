// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod models;
mod services;
mod state;
mod templates;
mod web;

// --- Imports ---
use crate::{
    config::Config,
    db::Database,
    services::auth_service,
    state::{AppState, RealtimeHub},
};
use axum::serve;
use std::env;
use tokio::net::TcpListener;
use tower_cookies::Key;
use tower_sessions::{ExpiredDeletion, SessionStore};
use tower_sessions_sqlx_store::{PostgresStore, SqliteStore};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "satisfacao=debug,tower_http=info,sqlx=warn,tower_sessions=info".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando servidor de feedback de satisfação...");

    let config = Config::from_env()?;

    // --- Base de Dados ---
    let db = match Database::connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao ligar à base de dados: {}", e);
            return Err(e.into());
        }
    };
    db.init_schema().await?;
    auth_service::seed_admins(&db, config.bcrypt_cost).await?;
    tracing::info!("✅ Base de dados pronta ({}).", db.backend_name());

    let key = session_key(&config)?;

    let app_state = AppState {
        db: db.clone(),
        realtime: RealtimeHub::default(),
    };

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);

    // --- Sessões: o store acompanha o motor da base de dados ---
    match db {
        Database::Sqlite(pool) => {
            let store = SqliteStore::new(pool)
                .with_table_name("sessions")
                .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
            store.migrate().await?;
            serve_with_sessions(listener, app_state, store, key).await
        }
        Database::Postgres(pool) => {
            let store = PostgresStore::new(pool)
                .with_table_name("sessions")
                .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
            store.migrate().await?;
            serve_with_sessions(listener, app_state, store, key).await
        }
    }
}

async fn serve_with_sessions<S>(
    listener: TcpListener,
    app_state: AppState,
    session_store: S,
    key: Key,
) -> anyhow::Result<()>
where
    S: SessionStore + ExpiredDeletion + Clone,
{
    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = cleanup_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let app = web::routes::create_app(app_state, session_store, key);

    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn session_key(config: &Config) -> anyhow::Result<Key> {
    match &config.session_secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("SESSION_SECRET inválida (mínimo 64 bytes): {}", e)),
        None => {
            tracing::warn!("⚠️ SESSION_SECRET não definida: usando chave aleatória, as sessões não sobrevivem a reinícios.");
            Ok(Key::generate())
        }
    }
}
