// src/services/export_service.rs
use crate::{
    db::{Database, FeedbackOrder},
    error::{AppError, AppResult},
    models::feedback::FeedbackRecord,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
    Json,
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(formato: &str) -> Result<Self, Self::Err> {
        match formato {
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            outro => Err(AppError::InvalidExportFormat(outro.to_string())),
        }
    }
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            ExportFormat::Csv => "feedbacks.csv",
            ExportFormat::Txt => "feedbacks.txt",
            ExportFormat::Json => "feedbacks.json",
        }
    }
}

/// Lê a tabela inteira (sem ORDER BY) e serializa no formato pedido.
pub async fn exportar(db: &Database, formato: ExportFormat) -> AppResult<String> {
    let registros = db.list_feedbacks(FeedbackOrder::Storage).await?;
    tracing::info!("Exportando {} feedbacks como {:?}", registros.len(), formato);
    render(formato, &registros)
}

pub fn render(formato: ExportFormat, registros: &[FeedbackRecord]) -> AppResult<String> {
    match formato {
        ExportFormat::Csv => Ok(render_csv(registros)),
        ExportFormat::Txt => Ok(render_txt(registros)),
        ExportFormat::Json => Ok(serde_json::to_string(registros)?),
    }
}

fn render_csv(registros: &[FeedbackRecord]) -> String {
    let mut output = String::from("id,grau,data,hora,dia_semana\n");
    for r in registros {
        let campos = [
            r.id.to_string(),
            csv_field(&r.grau),
            csv_field(&r.data),
            csv_field(&r.hora),
            csv_field(&r.dia_semana),
        ];
        output.push_str(&campos.join(","));
        output.push('\n');
    }
    output
}

// Aspas só quando necessário; aspas internas são duplicadas
fn csv_field(valor: &str) -> String {
    if valor.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", valor.replace('"', "\"\""))
    } else {
        valor.to_string()
    }
}

fn render_txt(registros: &[FeedbackRecord]) -> String {
    registros
        .iter()
        .map(|r| format!("{} | {} | {} {} | {}", r.id, r.grau, r.data, r.hora, r.dia_semana))
        .collect::<Vec<_>>()
        .join("\n")
}
