// src/services/report_service.rs
use crate::{
    db::{Database, FeedbackOrder},
    error::AppResult,
    models::{
        feedback::{CategoryCounts, FeedbackRecord},
        report::{FeedbackReport, StatsSummary, SEM_DADOS, SEM_REGISTROS},
    },
};

/// Relatório completo do painel de administração.
pub async fn admin_report(db: &Database) -> AppResult<FeedbackReport> {
    let registros = db.list_feedbacks(FeedbackOrder::DataHoraDesc).await?;
    let counts = db.count_by_grau().await?;
    Ok(build_report(counts, registros))
}

/// Corpo de `/api/stats`. O `dia_top` usa a ordem de leitura do motor.
pub async fn stats_summary(db: &Database) -> AppResult<StatsSummary> {
    let registros = db.list_feedbacks(FeedbackOrder::Storage).await?;
    let counts = db.count_by_grau().await?;
    Ok(StatsSummary {
        total: counts.total(),
        total_muito: counts.total_muito,
        total_satisfeito: counts.total_satisfeito,
        total_insatisfeito: counts.total_insatisfeito,
        dia_top: dia_top(&registros),
    })
}

/// `registros` já deve vir ordenado do mais recente para o mais antigo.
pub fn build_report(counts: CategoryCounts, registros: Vec<FeedbackRecord>) -> FeedbackReport {
    let total = counts.total();
    FeedbackReport {
        total,
        total_muito: counts.total_muito,
        total_satisfeito: counts.total_satisfeito,
        total_insatisfeito: counts.total_insatisfeito,
        percent_muito: percentual(counts.total_muito, total),
        percent_satisfeito: percentual(counts.total_satisfeito, total),
        percent_insatisfeito: percentual(counts.total_insatisfeito, total),
        dia_top: dia_top(&registros),
        ultimo_feedback: ultimo_feedback(&registros),
        registros,
    }
}

/// Percentagem com duas casas decimais; 0 quando não há total.
pub fn percentual(parte: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (parte as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
}

/// Dia da semana mais frequente. Em empate ganha o que aparece primeiro em `registros`.
pub fn dia_top(registros: &[FeedbackRecord]) -> String {
    // Vec em vez de HashMap para manter a ordem do primeiro encontro
    let mut contagem: Vec<(&str, usize)> = Vec::new();
    for registro in registros {
        match contagem.iter_mut().find(|(dia, _)| *dia == registro.dia_semana) {
            Some((_, n)) => *n += 1,
            None => contagem.push((registro.dia_semana.as_str(), 1)),
        }
    }

    let mut melhor: Option<(&str, usize)> = None;
    for (dia, n) in contagem {
        if melhor.map_or(true, |(_, max)| n > max) {
            melhor = Some((dia, n));
        }
    }
    melhor.map_or_else(|| SEM_DADOS.to_string(), |(dia, _)| dia.to_string())
}

pub fn ultimo_feedback(registros: &[FeedbackRecord]) -> String {
    registros
        .first()
        .map(|r| format!("{} {}", r.data, r.hora))
        .unwrap_or_else(|| SEM_REGISTROS.to_string())
}
