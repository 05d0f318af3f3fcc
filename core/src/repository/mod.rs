pub mod file;
pub mod traits;

pub use file::FileCardRepository;
pub use traits::CardRepository;
