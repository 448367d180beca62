// src/middleware/mod.rs

pub mod error_detail;
pub mod security;
pub mod session;
