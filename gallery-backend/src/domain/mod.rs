// src/domain/mod.rs
pub mod artist_model;
pub mod artwork_model;
pub mod counter_model;
pub mod feedback_model;
pub mod reference_data;
pub mod signature_model;
