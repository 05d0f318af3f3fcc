pub mod card;
pub mod spending;
