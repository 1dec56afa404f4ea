// src/services/feedback_service.rs
use crate::{
    db::Database,
    error::{AppError, AppResult},
    models::{
        feedback::{FeedbackRecord, NewFeedback},
        realtime::{InitSnapshot, RealtimeEvent, INIT_FEEDBACK_LIMIT},
    },
    state::RealtimeHub,
};
use chrono::Local;

pub const MENSAGEM_OBRIGADO: &str = "Obrigado pelo seu feedback!";

/// Grava um feedback com o carimbo do relógio do servidor e avisa os painéis ligados.
/// Inserção e recontagem não partilham transação: a contagem publicada pode já
/// incluir inserções concorrentes.
pub async fn registrar(db: &Database, hub: &RealtimeHub, grau: String) -> AppResult<FeedbackRecord> {
    let novo = NewFeedback::stamped(grau, Local::now().naive_local());
    let id = db.insert_feedback(&novo).await?;
    tracing::info!("Feedback {} registado: '{}' ({} {})", id, novo.grau, novo.data, novo.hora);

    let registro = db.find_feedback(id).await?.ok_or_else(|| {
        tracing::error!("Feedback {} inserido mas não encontrado na releitura!", id);
        AppError::InternalServerError
    })?;
    let counts = db.count_by_grau().await?;

    hub.publish(vec![
        RealtimeEvent::NewFeedback(registro.clone()),
        RealtimeEvent::StatsUpdate(counts),
    ]);

    Ok(registro)
}

/// Contagens atuais e os registos mais recentes, para quem acabou de ligar.
pub async fn init_snapshot(db: &Database) -> AppResult<InitSnapshot> {
    let stats = db.count_by_grau().await?;
    let feedbacks = db.latest_feedbacks(INIT_FEEDBACK_LIMIT).await?;
    Ok(InitSnapshot { stats, feedbacks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::{CategoryCounts, MUITO_SATISFEITO, SATISFEITO};
    use axum::extract::ws::Message;
    use std::time::Duration;
    use tokio::sync::mpsc;

    async fn memory_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    async fn next_event(rx: &mut mpsc::Receiver<Message>) -> serde_json::Value {
        let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("evento não chegou a tempo")
            .expect("canal fechado");
        match message {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("mensagem inesperada: {:?}", other),
        }
    }

    #[tokio::test]
    async fn registrar_stores_and_broadcasts_row_then_counts() {
        let db = memory_db().await;
        let hub = RealtimeHub::default();
        let (tx, mut rx) = mpsc::channel(8);
        hub.register(tx).await;

        registrar(&db, &hub, SATISFEITO.to_string()).await.unwrap();
        let registro = registrar(&db, &hub, MUITO_SATISFEITO.to_string()).await.unwrap();
        assert_eq!(registro.grau, MUITO_SATISFEITO);

        let primeiro = next_event(&mut rx).await;
        assert_eq!(primeiro["event"], "new_feedback");
        let _ = next_event(&mut rx).await;
        let novo = next_event(&mut rx).await;
        assert_eq!(novo["event"], "new_feedback");
        assert_eq!(novo["data"]["id"], registro.id);
        let stats = next_event(&mut rx).await;
        assert_eq!(stats["event"], "stats_update");
        assert_eq!(stats["data"]["total_muito"], 1);
        assert_eq!(stats["data"]["total_satisfeito"], 1);
    }

    #[tokio::test]
    async fn registrar_accepts_any_label() {
        let db = memory_db().await;
        let hub = RealtimeHub::default();
        let registro = registrar(&db, &hub, String::new()).await.unwrap();
        assert_eq!(registro.grau, "");
        assert_eq!(db.count_by_grau().await.unwrap(), CategoryCounts::default());
    }

    #[tokio::test]
    async fn snapshot_holds_at_most_ten_newest_rows() {
        let db = memory_db().await;
        let hub = RealtimeHub::default();
        let mut ids = Vec::new();
        for _ in 0..12 {
            ids.push(registrar(&db, &hub, SATISFEITO.to_string()).await.unwrap().id);
        }

        let snapshot = init_snapshot(&db).await.unwrap();
        assert_eq!(snapshot.stats.total_satisfeito, 12);
        assert_eq!(snapshot.feedbacks.len(), 10);
        assert_eq!(snapshot.feedbacks[0].id, *ids.last().unwrap());
        assert_eq!(snapshot.feedbacks[9].id, ids[2]);
    }
}
