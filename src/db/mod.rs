// src/db/mod.rs
//! Acesso a dados. Dois motores (SQLite embutido e PostgreSQL) atrás da mesma
//! interface; o SQL específico de cada um vive no respetivo módulo.
mod postgres;
mod sqlite;

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::AdminCredential,
        feedback::{CategoryCounts, FeedbackRecord, NewFeedback},
    },
};
use sqlx::{PgPool, SqlitePool};

/// Ordem de leitura dos feedbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOrder {
    /// Sem ORDER BY: a ordem que o motor devolver.
    Storage,
    IdDesc,
    /// Ordenação textual por `data` e `hora`, ambos DESC.
    DataHoraDesc,
}

impl FeedbackOrder {
    fn sql(self) -> &'static str {
        match self {
            FeedbackOrder::Storage => "",
            FeedbackOrder::IdDesc => " ORDER BY id DESC",
            FeedbackOrder::DataHoraDesc => " ORDER BY data DESC, hora DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Database {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl Database {
    /// Escolhe o motor pelo esquema da URL.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        if database_url.starts_with("sqlite:") {
            tracing::info!("Ligando à base de dados SQLite: {}", database_url);
            Ok(Database::Sqlite(sqlite::connect(database_url).await?))
        } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            tracing::info!("Ligando à base de dados PostgreSQL");
            Ok(Database::Postgres(postgres::connect(database_url).await?))
        } else {
            Err(AppError::ConfigError(format!(
                "DATABASE_URL com esquema não suportado: {}",
                database_url
            )))
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Database::Sqlite(_) => "sqlite",
            Database::Postgres(_) => "postgres",
        }
    }

    /// Cria as tabelas `feedbacks` e `admins` se ainda não existirem.
    pub async fn init_schema(&self) -> AppResult<()> {
        tracing::info!("Criando tabelas ({})...", self.backend_name());
        match self {
            Database::Sqlite(pool) => sqlite::init_schema(pool).await,
            Database::Postgres(pool) => postgres::init_schema(pool).await,
        }
    }

    /// Insere e devolve o id atribuído pelo motor.
    pub async fn insert_feedback(&self, novo: &NewFeedback) -> AppResult<i64> {
        match self {
            Database::Sqlite(pool) => sqlite::insert_feedback(pool, novo).await,
            Database::Postgres(pool) => postgres::insert_feedback(pool, novo).await,
        }
    }

    pub async fn find_feedback(&self, id: i64) -> AppResult<Option<FeedbackRecord>> {
        match self {
            Database::Sqlite(pool) => sqlite::find_feedback(pool, id).await,
            Database::Postgres(pool) => postgres::find_feedback(pool, id).await,
        }
    }

    pub async fn count_by_grau(&self) -> AppResult<CategoryCounts> {
        let grupos = match self {
            Database::Sqlite(pool) => sqlite::count_by_grau(pool).await?,
            Database::Postgres(pool) => postgres::count_by_grau(pool).await?,
        };
        Ok(CategoryCounts::from_grouped(grupos))
    }

    pub async fn list_feedbacks(&self, order: FeedbackOrder) -> AppResult<Vec<FeedbackRecord>> {
        let rows = match self {
            Database::Sqlite(pool) => sqlite::list_feedbacks(pool, order.sql()).await?,
            Database::Postgres(pool) => postgres::list_feedbacks(pool, order.sql()).await?,
        };
        tracing::debug!("Lidos {} feedbacks ({:?}).", rows.len(), order);
        Ok(rows)
    }

    /// Os `limit` registos mais recentes por id.
    pub async fn latest_feedbacks(&self, limit: i64) -> AppResult<Vec<FeedbackRecord>> {
        match self {
            Database::Sqlite(pool) => sqlite::latest_feedbacks(pool, limit).await,
            Database::Postgres(pool) => postgres::latest_feedbacks(pool, limit).await,
        }
    }

    pub async fn find_admin(&self, username: &str) -> AppResult<Option<AdminCredential>> {
        match self {
            Database::Sqlite(pool) => sqlite::find_admin(pool, username).await,
            Database::Postgres(pool) => postgres::find_admin(pool, username).await,
        }
    }

    pub async fn existing_admins(&self) -> AppResult<Vec<String>> {
        match self {
            Database::Sqlite(pool) => sqlite::existing_admins(pool).await,
            Database::Postgres(pool) => postgres::existing_admins(pool).await,
        }
    }

    /// Devolve `false` quando o username já existia (conflito ignorado).
    pub async fn insert_admin_if_absent(&self, username: &str, senha_hash: &str) -> AppResult<bool> {
        match self {
            Database::Sqlite(pool) => sqlite::insert_admin_if_absent(pool, username, senha_hash).await,
            Database::Postgres(pool) => postgres::insert_admin_if_absent(pool, username, senha_hash).await,
        }
    }

    pub async fn update_admin_senha(&self, username: &str, senha_hash: &str) -> AppResult<()> {
        match self {
            Database::Sqlite(pool) => sqlite::update_admin_senha(pool, username, senha_hash).await,
            Database::Postgres(pool) => postgres::update_admin_senha(pool, username, senha_hash).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn memory_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    fn novo(grau: &str, dia: u32, h: u32) -> NewFeedback {
        let agora = NaiveDate::from_ymd_opt(2025, 1, dia).unwrap().and_hms_opt(h, 0, 0).unwrap();
        NewFeedback::stamped(grau.to_string(), agora)
    }

    #[tokio::test]
    async fn unsupported_scheme_is_a_config_error() {
        let err = Database::connect("mysql://localhost/db").await.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let db = memory_db().await;
        db.init_schema().await.unwrap();
        assert!(db.list_feedbacks(FeedbackOrder::Storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn inserted_rows_are_read_back_verbatim() {
        let db = memory_db().await;
        let entrada = novo("Satisfeito", 4, 10);
        let id = db.insert_feedback(&entrada).await.unwrap();
        let registro = db.find_feedback(id).await.unwrap().unwrap();
        assert_eq!(registro.id, id);
        assert_eq!(registro.grau, entrada.grau);
        assert_eq!(registro.data, "04/01/2025");
        assert_eq!(registro.hora, "10:00:00");
        assert_eq!(registro.dia_semana, "Sábado");
        assert!(db.find_feedback(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn orderings_and_limits() {
        let db = memory_db().await;
        let a = db.insert_feedback(&novo("Satisfeito", 2, 9)).await.unwrap();
        let b = db.insert_feedback(&novo("Insatisfeito", 9, 8)).await.unwrap();
        let c = db.insert_feedback(&novo("Muito satisfeito", 9, 12)).await.unwrap();

        let por_id: Vec<i64> = db
            .list_feedbacks(FeedbackOrder::IdDesc)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(por_id, vec![c, b, a]);

        let por_data: Vec<i64> = db
            .list_feedbacks(FeedbackOrder::DataHoraDesc)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(por_data, vec![c, b, a]);

        let ultimos = db.latest_feedbacks(2).await.unwrap();
        assert_eq!(ultimos.iter().map(|r| r.id).collect::<Vec<_>>(), vec![c, b]);
    }

    #[tokio::test]
    async fn counts_only_cover_known_grades() {
        let db = memory_db().await;
        for grau in ["Muito satisfeito", "Muito satisfeito", "Insatisfeito", "Outro", ""] {
            db.insert_feedback(&novo(grau, 1, 1)).await.unwrap();
        }
        let counts = db.count_by_grau().await.unwrap();
        assert_eq!(
            counts,
            CategoryCounts { total_muito: 2, total_satisfeito: 0, total_insatisfeito: 1 }
        );
    }

    #[tokio::test]
    async fn duplicate_admins_are_ignored() {
        let db = memory_db().await;
        assert!(db.insert_admin_if_absent("admin_x", "h1").await.unwrap());
        assert!(!db.insert_admin_if_absent("admin_x", "h2").await.unwrap());
        let admin = db.find_admin("admin_x").await.unwrap().unwrap();
        assert_eq!(admin.senha, "h1");
        assert_eq!(db.existing_admins().await.unwrap(), vec!["admin_x".to_string()]);
        assert!(db.find_admin("ninguem").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn admin_password_can_be_replaced() {
        let db = memory_db().await;
        db.insert_admin_if_absent("admin_x", "antiga").await.unwrap();
        db.update_admin_senha("admin_x", "nova").await.unwrap();
        assert_eq!(db.find_admin("admin_x").await.unwrap().unwrap().senha, "nova");
    }
}
