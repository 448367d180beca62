// src/utils/mod.rs

pub mod batch;
pub mod error_helper;
pub mod file_name;
pub mod image_processor;
pub mod multipart;
pub mod validation;
