// src/models/feedback.rs
use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const MUITO_SATISFEITO: &str = "Muito satisfeito";
pub const SATISFEITO: &str = "Satisfeito";
pub const INSATISFEITO: &str = "Insatisfeito";

/// As três categorias apresentadas ao público, pela ordem dos botões.
pub const CATEGORIAS: [&str; 3] = [MUITO_SATISFEITO, SATISFEITO, INSATISFEITO];

/// Uma linha da tabela `feedbacks`. Só é criada pelo servidor, nunca alterada.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub grau: String,
    pub data: String,       // dd/mm/yyyy
    pub hora: String,       // HH:MM:SS
    pub dia_semana: String, // "Segunda-feira" ... "Domingo"
}

/// Registo ainda sem id. Data, hora e dia da semana vêm sempre da mesma amostra do relógio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub grau: String,
    pub data: String,
    pub hora: String,
    pub dia_semana: String,
}

impl NewFeedback {
    pub fn stamped(grau: String, agora: NaiveDateTime) -> Self {
        Self {
            grau,
            data: agora.format("%d/%m/%Y").to_string(),
            hora: agora.format("%H:%M:%S").to_string(),
            dia_semana: dia_semana_pt(agora.weekday()).to_string(),
        }
    }
}

pub fn dia_semana_pt(dia: Weekday) -> &'static str {
    match dia {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Corpo JSON de `POST /registrar`. Um `grau` ausente é gravado como texto vazio.
#[derive(Debug, Deserialize)]
pub struct RegistrarPayload {
    #[serde(default)]
    pub grau: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MensagemResponse {
    pub mensagem: String,
}

/// Contagens por categoria. Valores fora das três categorias não entram em nenhuma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub total_muito: i64,
    pub total_satisfeito: i64,
    pub total_insatisfeito: i64,
}

impl CategoryCounts {
    /// Constrói as contagens a partir de pares (grau, quantidade) vindos de um GROUP BY.
    pub fn from_grouped<I>(grupos: I) -> Self
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut counts = Self::default();
        for (grau, n) in grupos {
            match grau.as_str() {
                MUITO_SATISFEITO => counts.total_muito += n,
                SATISFEITO => counts.total_satisfeito += n,
                INSATISFEITO => counts.total_insatisfeito += n,
                _ => {}
            }
        }
        counts
    }

    pub fn total(&self) -> i64 {
        self.total_muito + self.total_satisfeito + self.total_insatisfeito
    }
}
