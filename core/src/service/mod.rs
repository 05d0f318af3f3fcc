pub mod card_service;
pub mod summary;
