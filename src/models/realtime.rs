// src/models/realtime.rs
use super::feedback::{CategoryCounts, FeedbackRecord};
use serde::Serialize;

/// Quantos registos recentes vão no snapshot inicial.
pub const INIT_FEEDBACK_LIMIT: i64 = 10;

/// Estado enviado apenas ao cliente que acabou de ligar.
#[derive(Debug, Clone, Serialize)]
pub struct InitSnapshot {
    pub stats: CategoryCounts,
    pub feedbacks: Vec<FeedbackRecord>, // id DESC
}

/// Mensagens servidor -> cliente. No fio: `{"event": "...", "data": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RealtimeEvent {
    Init(InitSnapshot),
    NewFeedback(FeedbackRecord),
    StatsUpdate(CategoryCounts),
}
