pub mod config;
pub mod daily;
pub mod hash;
pub mod monthly;
pub mod random;

pub use config::{DrawRange, GeneratorConfig};
pub use daily::{
    generate_daily_spending_monthly, generate_daily_spending_monthly_with,
    generate_daily_spending_yearly, generate_daily_spending_yearly_with,
};
pub use hash::hash;
pub use monthly::{generate_monthly_spending, generate_monthly_spending_with};
pub use random::{seeded_random, SeededRandom};
