// src/models/report.rs
use super::feedback::FeedbackRecord;
use serde::{Deserialize, Serialize};

/// Sentinela de `dia_top` quando não há registos.
pub const SEM_DADOS: &str = "Sem dados";
/// Sentinela de `ultimo_feedback` quando não há registos.
pub const SEM_REGISTROS: &str = "Nenhum registro";

/// Tudo o que o painel de administração mostra.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    pub total: i64,
    pub total_muito: i64,
    pub total_satisfeito: i64,
    pub total_insatisfeito: i64,
    pub percent_muito: f64,
    pub percent_satisfeito: f64,
    pub percent_insatisfeito: f64,
    pub dia_top: String,
    pub ultimo_feedback: String,
    // Ordenados por data DESC, hora DESC
    pub registros: Vec<FeedbackRecord>,
}

/// Corpo de `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: i64,
    pub total_muito: i64,
    pub total_satisfeito: i64,
    pub total_insatisfeito: i64,
    pub dia_top: String,
}
