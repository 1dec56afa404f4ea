// src/services/mod.rs
pub mod auth_service;
pub mod export_service;
pub mod feedback_service;
pub mod report_service;
