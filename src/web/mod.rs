// src/web/mod.rs
pub mod admin_handlers;
pub mod api_handlers;
pub mod auth_handlers;
pub mod export_handlers;
pub mod feedback_handlers;
pub mod mw_admin;
pub mod realtime_handlers;
pub mod routes;
