// src/repository/mod.rs
pub mod artist_repository;
pub mod artwork_repository;
pub mod counter_repository;
pub mod feedback_repository;
pub mod signature_repository;
