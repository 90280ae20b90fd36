//! Health metrics calculations module
//!
//! Provides the Mifflin-St Jeor BMR and the activity-scaled TDEE used to show
//! a user's daily energy budget next to what they have eaten.
//!
//! Gender and activity are stored as the free text the user typed. They are
//! interpreted here against a fixed English/Ukrainian vocabulary and never
//! fail: unknown gender uses the female constant, unknown activity uses the
//! sedentary multiplier.

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender as used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Tokens read as male, already lowercased
const MALE_TOKENS: &[&str] = &["m", "male", "man", "ч", "чол", "чоловік", "чоловіча"];

/// Tokens read as female, already lowercased
const FEMALE_TOKENS: &[&str] = &["f", "female", "woman", "ж", "жін", "жінка", "жіноча"];

impl Gender {
    /// Interpret free-text gender input.
    ///
    /// Matching is trimmed and case-insensitive. Anything outside the male
    /// vocabulary is treated as female.
    pub fn from_input(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        if MALE_TOKENS.contains(&normalized.as_str()) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Whether the input is a known token of either gender
    pub fn is_recognized(input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        MALE_TOKENS.contains(&normalized.as_str()) || FEMALE_TOKENS.contains(&normalized.as_str())
    }

    /// Mifflin-St Jeor sex constant
    pub fn bmr_constant(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

/// Activity tier for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    /// All tiers, lowest multiplier first
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    fn names(&self) -> &'static [&'static str] {
        match self {
            ActivityLevel::Sedentary => &["sedentary", "сидячий", "мінімальна"],
            ActivityLevel::Light => &["light", "lightly active", "легкий", "низька"],
            ActivityLevel::Moderate => &[
                "moderate",
                "moderately active",
                "середній",
                "помірний",
                "середня",
            ],
            ActivityLevel::Active => &["active", "high", "активний", "високий", "висока"],
            ActivityLevel::VeryActive => &[
                "very active",
                "extra active",
                "дуже активний",
                "дуже високий",
                "дуже висока",
            ],
        }
    }

    /// Look up a tier by any of its English or Ukrainian names
    pub fn lookup(input: &str) -> Option<Self> {
        let normalized = normalize_activity(input);
        Self::ALL
            .into_iter()
            .find(|level| level.names().contains(&normalized.as_str()))
    }

    /// Interpret free-text activity input, defaulting to sedentary
    pub fn from_input(input: &str) -> Self {
        Self::lookup(input).unwrap_or_default()
    }

    /// Canonical name stored in the database for this tier
    pub fn label(&self, locale: Locale) -> &'static str {
        let names = self.names();
        match locale {
            Locale::En => names[0],
            // Sedentary has a single English name before the Ukrainian ones
            Locale::Uk if *self == ActivityLevel::Sedentary => names[1],
            Locale::Uk => names[2],
        }
    }
}

/// Lowercase, trim, and collapse `_`/`-`/repeated whitespace to single spaces
fn normalize_activity(input: &str) -> String {
    input
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Profile data needed for energy calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age_years: i32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
}

impl HealthProfile {
    /// Build a profile from the raw stored gender and activity text
    pub fn from_stored(
        weight_kg: f64,
        height_cm: f64,
        age_years: i32,
        gender: &str,
        activity: &str,
    ) -> Self {
        Self {
            weight_kg,
            height_cm,
            age_years,
            gender: Gender::from_input(gender),
            activity_level: ActivityLevel::from_input(activity),
        }
    }
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + gender.bmr_constant()
}

/// BMR from free-text gender input
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> f64 {
    calculate_bmr_mifflin(weight_kg, height_cm, age_years, Gender::from_input(gender))
}

/// TDEE from a BMR and free-text activity input
///
/// TDEE = BMR × Activity Multiplier
pub fn tdee(bmr: f64, activity: &str) -> f64 {
    bmr * ActivityLevel::from_input(activity).multiplier()
}

/// Energy calculation result with breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// Basal Metabolic Rate
    pub bmr: f64,
    /// Total Daily Energy Expenditure
    pub tdee: f64,
    /// Activity multiplier used
    pub activity_multiplier: f64,
}

/// Calculate BMR and TDEE for a profile
pub fn calculate_energy(profile: &HealthProfile) -> EnergyResult {
    let bmr = calculate_bmr_mifflin(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender,
    );
    let activity_multiplier = profile.activity_level.multiplier();

    EnergyResult {
        bmr,
        tdee: bmr * activity_multiplier,
        activity_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // BMR Tests
    // =========================================================================

    #[test]
    fn test_bmr_reference_male() {
        assert_eq!(bmr(70.0, 175.0, 25, "male"), 1673.75);
    }

    #[rstest]
    #[case(70.0, 175.0, 25, "m", 1673.75)]
    #[case(70.0, 175.0, 25, "ч", 1673.75)]
    #[case(70.0, 175.0, 25, "f", 1507.75)]
    #[case(60.0, 165.0, 30, "ж", 1320.25)]
    #[case(80.0, 180.0, 30, "Male", 1780.0)]
    #[case(80.0, 180.0, 30, "  ЧОЛОВІК ", 1780.0)]
    fn test_bmr_table(
        #[case] weight: f64,
        #[case] height: f64,
        #[case] age: i32,
        #[case] gender: &str,
        #[case] expected: f64,
    ) {
        assert_eq!(bmr(weight, height, age, gender), expected);
    }

    #[rstest]
    #[case("")]
    #[case("other")]
    #[case("x")]
    fn test_unrecognized_gender_uses_female_branch(#[case] gender: &str) {
        assert_eq!(Gender::from_input(gender), Gender::Female);
        assert!(!Gender::is_recognized(gender));
        assert_eq!(bmr(70.0, 175.0, 25, gender), bmr(70.0, 175.0, 25, "female"));
    }

    #[test]
    fn test_gender_recognition() {
        assert!(Gender::is_recognized("Жінка"));
        assert!(Gender::is_recognized("MAN"));
    }

    // =========================================================================
    // TDEE Tests
    // =========================================================================

    #[rstest]
    #[case("sedentary", 1.2)]
    #[case("Сидячий", 1.2)]
    #[case("light", 1.375)]
    #[case("lightly_active", 1.375)]
    #[case("легкий", 1.375)]
    #[case("moderate", 1.55)]
    #[case("moderately-active", 1.55)]
    #[case("середній", 1.55)]
    #[case("active", 1.725)]
    #[case("високий", 1.725)]
    #[case("very active", 1.9)]
    #[case("Very  Active", 1.9)]
    #[case("дуже активний", 1.9)]
    fn test_activity_multiplier_table(#[case] activity: &str, #[case] expected: f64) {
        assert_eq!(ActivityLevel::from_input(activity).multiplier(), expected);
        assert_eq!(tdee(1000.0, activity), 1000.0 * expected);
    }

    #[rstest]
    #[case("")]
    #[case("couch potato")]
    #[case("5")]
    fn test_unrecognized_activity_defaults_to_sedentary(#[case] activity: &str) {
        assert_eq!(ActivityLevel::lookup(activity), None);
        assert_eq!(ActivityLevel::from_input(activity), ActivityLevel::Sedentary);
        assert_eq!(tdee(1673.75, activity), 1673.75 * 1.2);
    }

    #[test]
    fn test_labels_round_trip_through_lookup() {
        for level in ActivityLevel::ALL {
            for locale in [Locale::En, Locale::Uk] {
                assert_eq!(ActivityLevel::lookup(level.label(locale)), Some(level));
            }
        }
    }

    #[test]
    fn test_calculate_energy() {
        let profile = HealthProfile::from_stored(70.0, 175.0, 25, "m", "moderate");
        let result = calculate_energy(&profile);

        assert_eq!(result.bmr, 1673.75);
        assert_eq!(result.activity_multiplier, 1.55);
        assert_eq!(result.tdee, 1673.75 * 1.55);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: male and female BMR differ by exactly 166 kcal
        #[test]
        fn prop_gender_offset(
            weight in 30.0f64..200.0,
            height in 120.0f64..220.0,
            age in 1i32..100
        ) {
            let male = calculate_bmr_mifflin(weight, height, age, Gender::Male);
            let female = calculate_bmr_mifflin(weight, height, age, Gender::Female);
            prop_assert!((male - female - 166.0).abs() < 1e-9);
        }

        /// Property: BMR is deterministic
        #[test]
        fn prop_bmr_pure(
            weight in 30.0f64..200.0,
            height in 120.0f64..220.0,
            age in 1i32..100,
            gender in "[a-zA-Zчж]{0,8}"
        ) {
            prop_assert_eq!(
                bmr(weight, height, age, &gender),
                bmr(weight, height, age, &gender)
            );
        }

        /// Property: TDEE stays within [1.2, 1.9] × BMR for any activity text
        #[test]
        fn prop_tdee_bounded(bmr_value in 500.0f64..4000.0, activity in ".{0,20}") {
            let result = tdee(bmr_value, &activity);
            prop_assert!(result >= bmr_value * 1.2 - 1e-9);
            prop_assert!(result <= bmr_value * 1.9 + 1e-9);
        }
    }
}
