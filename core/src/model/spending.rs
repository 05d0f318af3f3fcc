use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
        }
    }
}

/// Per-category amounts. Also used for percentage shares.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryTotals {
    pub food: i64,
    pub transport: i64,
    pub entertainment: i64,
    pub utilities: i64,
}

impl CategoryTotals {
    pub fn from_fn(mut f: impl FnMut(Category) -> i64) -> Self {
        Self {
            food: f(Category::Food),
            transport: f(Category::Transport),
            entertainment: f(Category::Entertainment),
            utilities: f(Category::Utilities),
        }
    }

    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Food => self.food,
            Category::Transport => self.transport,
            Category::Entertainment => self.entertainment,
            Category::Utilities => self.utilities,
        }
    }

    pub fn sum(&self) -> i64 {
        self.food + self.transport + self.entertainment + self.utilities
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn add(&mut self, other: &CategoryTotals) {
        self.food += other.food;
        self.transport += other.transport;
        self.entertainment += other.entertainment;
        self.utilities += other.utilities;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlySpending {
    pub total: i64,
    pub categories: CategoryTotals,
    // Rounded independently, so these may add up to 99 or 101.
    #[serde(default)]
    pub percentages: CategoryTotals,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailySpendingEntry {
    pub date: NaiveDate,
    pub total: i64,
    pub categories: CategoryTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_totals_accessors() {
        let totals = CategoryTotals { food: 4, transport: 3, entertainment: 2, utilities: 1 };
        assert_eq!(totals.sum(), 10);
        assert_eq!(totals.get(Category::Entertainment), 2);

        let collected: Vec<_> = totals.iter().collect();
        assert_eq!(collected[0], (Category::Food, 4));
        assert_eq!(collected[3], (Category::Utilities, 1));
    }

    #[test]
    fn test_entry_serializes_iso_date() {
        let entry = DailySpendingEntry {
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            total: 10,
            categories: CategoryTotals::default(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-02-29");
    }
}
