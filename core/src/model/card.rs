use serde::{Deserialize, Serialize};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::generator::{
    generate_daily_spending_monthly, generate_daily_spending_yearly, generate_monthly_spending,
    hash,
};
use crate::model::spending::{DailySpendingEntry, MonthlySpending};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailySpending {
    pub monthly: Vec<DailySpendingEntry>,
    pub yearly: Vec<DailySpendingEntry>,
}

/// Cached generation output for one card, in the shape the dashboard stores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub card_id: String,
    pub card_number: String,
    pub monthly_spending: MonthlySpending,
    pub daily_spending: DailySpending,
    pub is_active: bool,
    pub generated_at: DateTime<Utc>,
}

impl CardRecord {
    /// `month` is zero-based, as everywhere in the generator.
    pub fn generate(card_number: &str, year: i32, month: u32, now: DateTime<Utc>) -> Self {
        Self {
            card_id: card_id_for(card_number),
            card_number: card_number.to_string(),
            monthly_spending: generate_monthly_spending(card_number),
            daily_spending: DailySpending {
                monthly: generate_daily_spending_monthly(card_number, year, month),
                yearly: generate_daily_spending_yearly(card_number, year),
            },
            is_active: true,
            generated_at: now,
        }
    }

    /// True when the cached daily data covers the month containing `today`.
    pub fn covers(&self, today: NaiveDate) -> bool {
        match self.daily_spending.monthly.first() {
            Some(first) => first.date.year() == today.year() && first.date.month() == today.month(),
            None => false,
        }
    }
}

pub fn card_id_for(card_number: &str) -> String {
    format!("card-{:08x}", hash(card_number))
}

pub fn masked_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() <= 4 {
        return digits.into_iter().collect();
    }
    let last_four: String = digits[digits.len() - 4..].iter().collect();
    format!("•••• {}", last_four)
}
