use serde::{Deserialize, Serialize};

use crate::model::spending::Category;

/// Inclusive integer bounds for one draw.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub min: i64,
    pub max: i64,
}

impl DrawRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryRanges {
    pub food: DrawRange,
    pub transport: DrawRange,
    pub entertainment: DrawRange,
    pub utilities: DrawRange,
}

impl CategoryRanges {
    pub fn get(&self, category: Category) -> DrawRange {
        match category {
            Category::Food => self.food,
            Category::Transport => self.transport,
            Category::Entertainment => self.entertainment,
            Category::Utilities => self.utilities,
        }
    }
}

/// Seasonal factor applied to every day of a month (1-based) in yearly data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonalBoost {
    pub month: u32,
    pub boost: DrawRange,
}

/// Fixed-date boost (1-based month and day) applied after the floor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HolidayBoost {
    pub month: u32,
    pub day: u32,
    pub boost: DrawRange,
}

/// Numeric constants of the spending generator.
///
/// Multiplier ranges are expressed in tenths: a draw from `12..=18` becomes a
/// factor between 1.2 and 1.8.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub monthly_total: DrawRange,
    pub category_weights: CategoryRanges,
    pub weekend_multiplier: DrawRange,
    pub weekday_multiplier: DrawRange,
    pub variation: DrawRange,
    pub seasonal: Vec<SeasonalBoost>,
    pub holidays: Vec<HolidayBoost>,
    pub floor_ratio: f64,
    /// Denominator for the yearly daily average, independent of leap years.
    pub yearly_days: f64,
}

impl GeneratorConfig {
    pub fn seasonal_boost(&self, month: u32) -> Option<DrawRange> {
        self.seasonal.iter().find(|s| s.month == month).map(|s| s.boost)
    }

    pub fn holiday_boost(&self, month: u32, day: u32) -> Option<DrawRange> {
        self.holidays
            .iter()
            .find(|h| h.month == month && h.day == day)
            .map(|h| h.boost)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            monthly_total: DrawRange::new(8000, 15000),
            category_weights: CategoryRanges {
                food: DrawRange::new(25, 40),
                transport: DrawRange::new(20, 35),
                entertainment: DrawRange::new(15, 30),
                utilities: DrawRange::new(10, 25),
            },
            weekend_multiplier: DrawRange::new(12, 18),
            weekday_multiplier: DrawRange::new(8, 12),
            variation: DrawRange::new(7, 13),
            seasonal: vec![
                SeasonalBoost { month: 12, boost: DrawRange::new(15, 25) },
                SeasonalBoost { month: 7, boost: DrawRange::new(12, 18) },
                SeasonalBoost { month: 3, boost: DrawRange::new(10, 15) },
            ],
            holidays: vec![
                HolidayBoost { month: 12, day: 25, boost: DrawRange::new(25, 35) },
                HolidayBoost { month: 1, day: 1, boost: DrawRange::new(25, 35) },
                HolidayBoost { month: 2, day: 14, boost: DrawRange::new(18, 25) },
                HolidayBoost { month: 10, day: 31, boost: DrawRange::new(15, 22) },
            ],
            floor_ratio: 0.3,
            yearly_days: 366.0,
        }
    }
}
