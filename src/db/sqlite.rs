// src/db/sqlite.rs
use crate::{
    error::AppResult,
    models::{
        admin::AdminCredential,
        feedback::{FeedbackRecord, NewFeedback},
    },
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub async fn connect(database_url: &str) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    // Uma base em memória vive apenas enquanto a sua conexão estiver aberta
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedbacks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
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
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            senha TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_feedback(pool: &SqlitePool, novo: &NewFeedback) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO feedbacks (grau, data, hora, dia_semana) VALUES (?, ?, ?, ?)",
    )
    .bind(&novo.grau)
    .bind(&novo.data)
    .bind(&novo.hora)
    .bind(&novo.dia_semana)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_feedback(pool: &SqlitePool, id: i64) -> AppResult<Option<FeedbackRecord>> {
    let registro = sqlx::query_as::<_, FeedbackRecord>(
        "SELECT id, grau, data, hora, dia_semana FROM feedbacks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(registro)
}

pub async fn count_by_grau(pool: &SqlitePool) -> AppResult<Vec<(String, i64)>> {
    let grupos = sqlx::query_as::<_, (String, i64)>(
        "SELECT grau, COUNT(*) FROM feedbacks GROUP BY grau",
    )
    .fetch_all(pool)
    .await?;
    Ok(grupos)
}

pub async fn list_feedbacks(pool: &SqlitePool, order_by: &str) -> AppResult<Vec<FeedbackRecord>> {
    let sql = format!("SELECT id, grau, data, hora, dia_semana FROM feedbacks{}", order_by);
    let registros = sqlx::query_as::<_, FeedbackRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(registros)
}

pub async fn latest_feedbacks(pool: &SqlitePool, limit: i64) -> AppResult<Vec<FeedbackRecord>> {
    let registros = sqlx::query_as::<_, FeedbackRecord>(
        "SELECT id, grau, data, hora, dia_semana FROM feedbacks ORDER BY id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(registros)
}

pub async fn find_admin(pool: &SqlitePool, username: &str) -> AppResult<Option<AdminCredential>> {
    let admin = sqlx::query_as::<_, AdminCredential>(
        "SELECT username, senha FROM admins WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

pub async fn existing_admins(pool: &SqlitePool) -> AppResult<Vec<String>> {
    let nomes = sqlx::query_scalar::<_, String>("SELECT username FROM admins ORDER BY username")
        .fetch_all(pool)
        .await?;
    Ok(nomes)
}

pub async fn insert_admin_if_absent(pool: &SqlitePool, username: &str, senha_hash: &str) -> AppResult<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO admins (username, senha) VALUES (?, ?)")
        .bind(username)
        .bind(senha_hash)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn update_admin_senha(pool: &SqlitePool, username: &str, senha_hash: &str) -> AppResult<()> {
    sqlx::query("UPDATE admins SET senha = ? WHERE username = ?")
        .bind(senha_hash)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}
