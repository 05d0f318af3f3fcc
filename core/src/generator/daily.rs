use chrono::{Datelike, NaiveDate, Weekday};

use crate::generator::config::GeneratorConfig;
use crate::generator::monthly::{generate_monthly_spending_with, share_of};
use crate::generator::random::SeededRandom;
use crate::model::spending::{CategoryTotals, DailySpendingEntry, MonthlySpending};
use crate::time::{days_in_month, first_of_month};

/// One entry per day of `month` (zero-based), in date order.
pub fn generate_daily_spending_monthly(identifier: &str, year: i32, month: u32) -> Vec<DailySpendingEntry> {
    generate_daily_spending_monthly_with(identifier, year, month, &GeneratorConfig::default())
}

pub fn generate_daily_spending_monthly_with(
    identifier: &str,
    year: i32,
    month: u32,
    config: &GeneratorConfig,
) -> Vec<DailySpendingEntry> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };
    let days = days_in_month(year, month);

    let monthly = generate_monthly_spending_with(identifier, config);
    let average = monthly.total as f64 / days as f64;
    // The per-day stream restarts at the hash; it is not a continuation of
    // the monthly draws.
    let mut rng = SeededRandom::from_identifier(identifier);

    first
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let multiplier = day_of_week_multiplier(&mut rng, date, config);
            let variation = rng.draw_factor(config.variation);
            let total = (average * multiplier * variation).round() as i64;
            entry(date, total, &monthly)
        })
        .collect()
}

/// One entry per day of `year`. The daily average always divides by
/// `config.yearly_days`, leap year or not.
pub fn generate_daily_spending_yearly(identifier: &str, year: i32) -> Vec<DailySpendingEntry> {
    generate_daily_spending_yearly_with(identifier, year, &GeneratorConfig::default())
}

pub fn generate_daily_spending_yearly_with(
    identifier: &str,
    year: i32,
    config: &GeneratorConfig,
) -> Vec<DailySpendingEntry> {
    yearly_draws(identifier, year, config)
        .into_iter()
        .map(|draw| draw.entry)
        .collect()
}

struct YearlyDraw {
    entry: DailySpendingEntry,
    // Total after the floor, before any holiday boost.
    base_total: i64,
}

fn yearly_draws(identifier: &str, year: i32, config: &GeneratorConfig) -> Vec<YearlyDraw> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };

    let monthly = generate_monthly_spending_with(identifier, config);
    let average = monthly.total as f64 / config.yearly_days;
    let mut rng = SeededRandom::from_identifier(identifier);
    let floor = (average * config.floor_ratio).round() as i64;

    first
        .iter_days()
        .take_while(|date| date.year() == year)
        .map(|date| {
            let mut multiplier = day_of_week_multiplier(&mut rng, date, config);
            if let Some(boost) = config.seasonal_boost(date.month()) {
                multiplier *= rng.draw_factor(boost);
            }
            let variation = rng.draw_factor(config.variation);

            let base_total = ((average * multiplier * variation).round() as i64).max(floor);
            let total = match config.holiday_boost(date.month(), date.day()) {
                Some(boost) => (base_total as f64 * rng.draw_factor(boost)).round() as i64,
                None => base_total,
            };

            YearlyDraw { entry: entry(date, total, &monthly), base_total }
        })
        .collect()
}

fn day_of_week_multiplier(rng: &mut SeededRandom, date: NaiveDate, config: &GeneratorConfig) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => rng.draw_factor(config.weekend_multiplier),
        _ => rng.draw_factor(config.weekday_multiplier),
    }
}

fn entry(date: NaiveDate, total: i64, monthly: &MonthlySpending) -> DailySpendingEntry {
    DailySpendingEntry {
        date,
        total,
        categories: CategoryTotals::from_fn(|c| share_of(total, monthly.percentages.get(c))),
    }
}
