pub mod generator;
pub mod model;
pub mod repository;
pub mod service;
pub mod settings;
pub mod time;

pub use generator::{
    generate_daily_spending_monthly, generate_daily_spending_yearly, generate_monthly_spending,
    hash, seeded_random, GeneratorConfig, SeededRandom,
};
pub use model::card::{card_id_for, masked_number, CardRecord, DailySpending};
pub use model::spending::{Category, CategoryTotals, DailySpendingEntry, MonthlySpending};
pub use repository::{CardRepository, FileCardRepository};
pub use service::card_service::CardService;
pub use service::summary::{monthly_rollup, summarize, MonthRollup, PeakDay, PeriodSummary};
pub use settings::{resolve_data_dir, Settings};
pub use time::{days_in_month, parse_month, parse_year};
