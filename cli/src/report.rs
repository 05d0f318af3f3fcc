use chrono::Datelike;
use spendboard_core::{
    masked_number, monthly_rollup, summarize, CardRecord, Category, DailySpendingEntry, MonthlySpending,
};
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify};
use tabled::settings::object::Rows;

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Total")]
    total: i64,
    #[tabled(rename = "Food")]
    food: i64,
    #[tabled(rename = "Transport")]
    transport: i64,
    #[tabled(rename = "Entertainment")]
    entertainment: i64,
    #[tabled(rename = "Utilities")]
    utilities: i64,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Days")]
    days: usize,
    #[tabled(rename = "Total")]
    total: i64,
    #[tabled(rename = "Avg/day")]
    average: String,
    #[tabled(rename = "Food")]
    food: i64,
    #[tabled(rename = "Transport")]
    transport: i64,
    #[tabled(rename = "Entertainment")]
    entertainment: i64,
    #[tabled(rename = "Utilities")]
    utilities: i64,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Amount")]
    amount: i64,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Card")]
    card: String,
    #[tabled(rename = "Monthly")]
    monthly: i64,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Generated")]
    generated: String,
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn show_monthly(card_number: &str, year: i32, month: u32, entries: &[DailySpendingEntry]) {
    println!(
        "\n\x1b[1;36m{} {:04}-{:02}\x1b[0m",
        masked_number(card_number),
        year,
        month + 1
    );

    let rows: Vec<DayRow> = entries
        .iter()
        .map(|e| DayRow {
            date: e.date.format("%Y-%m-%d (%a)").to_string(),
            total: e.total,
            food: e.categories.food,
            transport: e.categories.transport,
            entertainment: e.categories.entertainment,
            utilities: e.categories.utilities,
        })
        .collect();
    println!("{}", styled(Table::new(rows)));

    let summary = summarize(entries);
    print!("Total: {}  Avg: {:.1}/day", summary.total, summary.average);
    if let Some(peak) = summary.peak {
        print!("  Peak: {} on {}", peak.total, peak.date);
    }
    println!();
}

pub fn show_yearly(card_number: &str, year: i32, entries: &[DailySpendingEntry]) {
    println!("\n\x1b[1;36m{} {}\x1b[0m", masked_number(card_number), year);

    let rows: Vec<MonthRow> = monthly_rollup(entries)
        .into_iter()
        .map(|m| MonthRow {
            month: format!("{:04}-{:02}", m.year, m.month),
            days: m.days,
            total: m.total,
            average: format!("{:.1}", m.total as f64 / m.days as f64),
            food: m.categories.food,
            transport: m.categories.transport,
            entertainment: m.categories.entertainment,
            utilities: m.categories.utilities,
        })
        .collect();
    println!("{}", styled(Table::new(rows)));

    let summary = summarize(entries);
    print!("Year total: {}  Avg: {:.1}/day", summary.total, summary.average);
    if let Some(peak) = summary.peak {
        print!("  Peak: {} on {} ({})", peak.total, peak.date, peak.date.weekday());
    }
    println!();
}

pub fn show_summary(card_number: &str, spending: &MonthlySpending) {
    println!("\n\x1b[1;36m{}\x1b[0m monthly spending: {}", masked_number(card_number), spending.total);

    let rows: Vec<CategoryRow> = Category::ALL
        .iter()
        .map(|c| CategoryRow {
            category: c.label().to_string(),
            share: format!("{}%", spending.percentages.get(*c)),
            amount: spending.categories.get(*c),
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}

pub fn show_cards(records: &[CardRecord]) {
    if records.is_empty() {
        println!("No cards stored. Run `spendboard sync <card>` first.");
        return;
    }

    let rows: Vec<CardRow> = records
        .iter()
        .map(|r| CardRow {
            id: r.card_id.clone(),
            card: masked_number(&r.card_number),
            monthly: r.monthly_spending.total,
            period: r
                .daily_spending
                .monthly
                .first()
                .map(|e| e.date.format("%Y-%m").to_string())
                .unwrap_or_else(|| "-".to_string()),
            active: if r.is_active { "yes".to_string() } else { "no".to_string() },
            generated: r.generated_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}
