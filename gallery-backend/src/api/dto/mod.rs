pub mod artist_dto;
pub mod artwork_dto;
pub mod counter_dto;
pub mod feedback_dto;
pub mod signature_dto;
pub mod system_dto;
