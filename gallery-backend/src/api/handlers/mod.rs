pub mod artist_handler;
pub mod artwork_handler;
pub mod counter_handler;
pub mod feedback_handler;
pub mod signature_handler;
pub mod system_handler;
