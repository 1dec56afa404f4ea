// src/models/mod.rs
pub mod admin;
pub mod feedback;
pub mod realtime;
pub mod report;
