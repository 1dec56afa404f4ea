// src/templates.rs
use crate::models::report::FeedbackReport;
use askama::Template;

/// Página pública com os três botões de satisfação.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub categorias: &'static [&'static str],
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub admin_user: String,
    pub report: FeedbackReport,
    // Percentagens já formatadas com duas casas
    pub percent_muito: String,
    pub percent_satisfeito: String,
    pub percent_insatisfeito: String,
}

impl AdminPage {
    pub fn new(admin_user: String, report: FeedbackReport) -> Self {
        Self {
            admin_user,
            percent_muito: format!("{:.2}", report.percent_muito),
            percent_satisfeito: format!("{:.2}", report.percent_satisfeito),
            percent_insatisfeito: format!("{:.2}", report.percent_insatisfeito),
            report,
        }
    }
}
