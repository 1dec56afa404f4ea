// src/db/postgres.rs
use crate::{
    error::AppResult,
    models::{
        admin::AdminCredential,
        feedback::{FeedbackRecord, NewFeedback},
    },
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub async fn connect(database_url: &str) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedbacks (
            id BIGSERIAL PRIMARY KEY,
            grau TEXT NOT NULL,
            data TEXT NOT NULL,
            hora TEXT NOT NULL,
            dia_semana TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            senha TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_feedback(pool: &PgPool, novo: &NewFeedback) -> AppResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO feedbacks (grau, data, hora, dia_semana) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&novo.grau)
    .bind(&novo.data)
    .bind(&novo.hora)
    .bind(&novo.dia_semana)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn find_feedback(pool: &PgPool, id: i64) -> AppResult<Option<FeedbackRecord>> {
    let registro = sqlx::query_as::<_, FeedbackRecord>(
        "SELECT id, grau, data, hora, dia_semana FROM feedbacks WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(registro)
}

pub async fn count_by_grau(pool: &PgPool) -> AppResult<Vec<(String, i64)>> {
    let grupos = sqlx::query_as::<_, (String, i64)>(
        "SELECT grau, COUNT(*) FROM feedbacks GROUP BY grau",
    )
    .fetch_all(pool)
    .await?;
    Ok(grupos)
}

pub async fn list_feedbacks(pool: &PgPool, order_by: &str) -> AppResult<Vec<FeedbackRecord>> {
    let sql = format!("SELECT id, grau, data, hora, dia_semana FROM feedbacks{}", order_by);
    let registros = sqlx::query_as::<_, FeedbackRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(registros)
}

pub async fn latest_feedbacks(pool: &PgPool, limit: i64) -> AppResult<Vec<FeedbackRecord>> {
    let registros = sqlx::query_as::<_, FeedbackRecord>(
        "SELECT id, grau, data, hora, dia_semana FROM feedbacks ORDER BY id DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(registros)
}

pub async fn find_admin(pool: &PgPool, username: &str) -> AppResult<Option<AdminCredential>> {
    let admin = sqlx::query_as::<_, AdminCredential>(
        "SELECT username, senha FROM admins WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

pub async fn existing_admins(pool: &PgPool) -> AppResult<Vec<String>> {
    let nomes = sqlx::query_scalar::<_, String>("SELECT username FROM admins ORDER BY username")
        .fetch_all(pool)
        .await?;
    Ok(nomes)
}

pub async fn insert_admin_if_absent(pool: &PgPool, username: &str, senha_hash: &str) -> AppResult<bool> {
    let result = sqlx::query(
        "INSERT INTO admins (username, senha) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(senha_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn update_admin_senha(pool: &PgPool, username: &str, senha_hash: &str) -> AppResult<()> {
    sqlx::query("UPDATE admins SET senha = $1 WHERE username = $2")
        .bind(senha_hash)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}
