//! Data models for the Calorie Tracker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw user form, exactly as typed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserForm {
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub age: String,
    pub activity: String,
}

/// Raw food entry form, exactly as typed
///
/// `grams` and `calories_per_100g` are used when `grams` is non-blank;
/// otherwise `calories` is read as a direct value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryForm {
    pub product: String,
    pub grams: String,
    pub calories_per_100g: String,
    pub calories: String,
}

/// Validated registration data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewUser {
    /// Free text; interpreted by `Gender::from_input`
    pub gender: String,
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub weight_kg: f64,
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub height_cm: f64,
    #[validate(range(min = 1, message = "must be positive"))]
    pub age_years: i32,
    /// Free text; interpreted by `ActivityLevel::from_input`
    pub activity: String,
}

/// How the calories of an entry were given
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Portion {
    /// Weighed amount with an energy density
    Weighed { grams: f64, calories_per_100g: f64 },
    /// Calories entered directly
    Direct { calories: f64 },
}

impl Portion {
    /// Calories this portion contributes
    pub fn calories(&self) -> f64 {
        match *self {
            Portion::Weighed {
                grams,
                calories_per_100g,
            } => crate::nutrition::calories_from_grams(grams, calories_per_100g),
            Portion::Direct { calories } => calories,
        }
    }

    pub fn grams(&self) -> Option<f64> {
        match *self {
            Portion::Weighed { grams, .. } => Some(grams),
            Portion::Direct { .. } => None,
        }
    }

    pub fn calories_per_100g(&self) -> Option<f64> {
        match *self {
            Portion::Weighed {
                calories_per_100g, ..
            } => Some(calories_per_100g),
            Portion::Direct { .. } => None,
        }
    }
}

/// Validated food entry, before it is stamped with a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub product: String,
    pub portion: Portion,
}

/// Calories consumed on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub entry_count: i64,
}

impl DailyTotal {
    /// A day without entries
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_calories: 0.0,
            entry_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portion_weighed() {
        let portion = Portion::Weighed {
            grams: 150.0,
            calories_per_100g: 52.0,
        };
        assert_eq!(portion.calories(), 78.0);
        assert_eq!(portion.grams(), Some(150.0));
        assert_eq!(portion.calories_per_100g(), Some(52.0));
    }

    #[test]
    fn test_portion_direct() {
        let portion = Portion::Direct { calories: 250.0 };
        assert_eq!(portion.calories(), 250.0);
        assert_eq!(portion.grams(), None);
        assert_eq!(portion.calories_per_100g(), None);
    }

    #[test]
    fn test_new_user_validation() {
        let user = NewUser {
            gender: "m".to_string(),
            weight_kg: 70.0,
            height_cm: 175.0,
            age_years: 25,
            activity: "sedentary".to_string(),
        };
        assert!(user.validate().is_ok());

        let user = NewUser {
            weight_kg: 0.0,
            ..user
        };
        let errors = user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("weight_kg"));
    }

    #[test]
    fn test_portion_serde_tag() {
        let json = serde_json::to_value(Portion::Direct { calories: 10.0 }).unwrap();
        assert_eq!(json["kind"], "direct");
        assert_eq!(json["calories"], 10.0);
    }
}
