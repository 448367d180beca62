// src/service/mod.rs
pub mod artist_service;
pub mod artwork_service;
pub mod counter_service;
pub mod feedback_service;
pub mod image_service;
pub mod signature_service;
pub mod storage_service;
