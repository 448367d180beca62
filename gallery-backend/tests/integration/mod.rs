// tests/integration/mod.rs

pub mod artist_tests;
pub mod artwork_tests;
pub mod feedback_tests;
pub mod signature_tests;
