//! Calorie arithmetic: gram-based derivation, daily aggregation, and the
//! zero-filled trend window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::health_metrics::EnergyResult;
use crate::models::DailyTotal;

/// Calories in a weighed portion
///
/// calories = grams × calories_per_100g / 100
pub fn calories_from_grams(grams: f64, calories_per_100g: f64) -> f64 {
    grams * calories_per_100g / 100.0
}

/// Sum a day's entry calories
pub fn sum_calories<I>(calories: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    calories.into_iter().sum()
}

/// Incrementally maintained total for the current day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningTotal {
    pub calories: f64,
    pub entries: i64,
}

impl RunningTotal {
    /// Start from an already-loaded list of calories
    pub fn from_calories<I>(calories: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        calories.into_iter().fold(Self::default(), |mut total, c| {
            total.add(c);
            total
        })
    }

    pub fn add(&mut self, calories: f64) {
        self.calories += calories;
        self.entries += 1;
    }
}

/// First and last day of a trend window ending on `end`
///
/// A window of zero days is treated as one day.
pub fn trend_window(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = i64::from(days.max(1)) - 1;
    (end - Duration::days(span), end)
}

/// Expand sparse per-day totals into one point per day, oldest first
///
/// Days missing from `totals` are reported as zero. Totals outside the window
/// are ignored.
pub fn fill_daily_totals(totals: &[DailyTotal], end: NaiveDate, days: u32) -> Vec<DailyTotal> {
    let (start, _) = trend_window(end, days);
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            totals
                .iter()
                .find(|t| t.date == day)
                .copied()
                .unwrap_or_else(|| DailyTotal::empty(day))
        })
        .collect()
}

/// Energy budget against what was eaten today
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub consumed: f64,
    /// TDEE minus consumed; negative once over budget
    pub remaining: f64,
}

impl EnergyBalance {
    pub fn new(energy: EnergyResult, consumed: f64) -> Self {
        Self {
            bmr: energy.bmr,
            tdee: energy.tdee,
            activity_multiplier: energy.activity_multiplier,
            consumed,
            remaining: energy.tdee - consumed,
        }
    }
}
