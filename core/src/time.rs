use chrono::{Datelike, Local, Months, NaiveDate};
use anyhow::{anyhow, Result};

/// Rolls a zero-based month past December into following years.
pub fn normalize_month(year: i32, month: u32) -> (i32, u32) {
    (year + (month / 12) as i32, month % 12)
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (year, month) = normalize_month(year, month);
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = first_of_month(year, month) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        None => 0,
    }
}

/// Accepts `YYYY-MM`, `this` or `last`. Returns (year, zero-based month).
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
    parse_month_from(input, Local::now().date_naive())
}

pub fn parse_month_from(input: &str, today: NaiveDate) -> Result<(i32, u32)> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "this" | "now" => return Ok((today.year(), today.month0())),
        "last" | "prev" => {
            let last = today
                .checked_sub_months(Months::new(1))
                .ok_or_else(|| anyhow!("Date out of range"))?;
            return Ok((last.year(), last.month0()));
        }
        _ => {}
    }

    let (year_str, month_str) = input
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected YYYY-MM, got '{}'", input))?;
    let year: i32 = year_str.parse().map_err(|_| anyhow!("Invalid year: {}", year_str))?;
    let month: u32 = month_str.parse().map_err(|_| anyhow!("Invalid month: {}", month_str))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("Month must be between 1 and 12, got {}", month));
    }
    Ok((year, month - 1))
}

/// Accepts `YYYY` or `this`.
pub fn parse_year(input: &str) -> Result<i32> {
    parse_year_from(input, Local::now().date_naive())
}

pub fn parse_year_from(input: &str, today: NaiveDate) -> Result<i32> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("this") {
        return Ok(today.year());
    }
    input.parse().map_err(|_| anyhow!("Invalid year: {}", input))
}
