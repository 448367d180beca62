// src/config.rs
pub mod app;

pub use app::{AppConfig, Environment, SecurityConfig, ServerConfig};
