use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::spending::{CategoryTotals, DailySpendingEntry};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeakDay {
    pub date: NaiveDate,
    pub total: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub days: usize,
    pub total: i64,
    pub average: f64,
    pub categories: CategoryTotals,
    pub peak: Option<PeakDay>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthRollup {
    pub year: i32,
    pub month: u32, // 1-12
    pub days: usize,
    pub total: i64,
    pub categories: CategoryTotals,
}

pub fn summarize(entries: &[DailySpendingEntry]) -> PeriodSummary {
    let mut categories = CategoryTotals::default();
    let mut total = 0;
    let mut peak: Option<PeakDay> = None;

    for entry in entries {
        total += entry.total;
        categories.add(&entry.categories);
        // First day wins ties.
        if peak.as_ref().map_or(true, |p| entry.total > p.total) {
            peak = Some(PeakDay { date: entry.date, total: entry.total });
        }
    }

    let average = if entries.is_empty() { 0.0 } else { total as f64 / entries.len() as f64 };

    PeriodSummary {
        days: entries.len(),
        total,
        average,
        categories,
        peak,
    }
}

/// Groups date-ordered entries by calendar month.
pub fn monthly_rollup(entries: &[DailySpendingEntry]) -> Vec<MonthRollup> {
    let mut rollups: Vec<MonthRollup> = Vec::new();
    for entry in entries {
        let (year, month) = (entry.date.year(), entry.date.month());
        match rollups.last_mut() {
            Some(last) if last.year == year && last.month == month => {
                last.days += 1;
                last.total += entry.total;
                last.categories.add(&entry.categories);
            }
            _ => rollups.push(MonthRollup {
                year,
                month,
                days: 1,
                total: entry.total,
                categories: entry.categories,
            }),
        }
    }
    rollups
}
