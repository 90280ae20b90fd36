//! Built-in user-facing strings for the two supported locales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Uk,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Uk => write!(f, "uk"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "uk" | "ua" | "ukrainian" => Ok(Locale::Uk),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

/// Message keys shown by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Title,
    Prompt,
    Gender,
    Weight,
    Height,
    Age,
    Activity,
    Product,
    Grams,
    CaloriesPer100g,
    Calories,
    UserId,
    UserCreated,
    UserDeleted,
    UserSelected,
    NoUsers,
    NoEntries,
    DailyTotal,
    Bmr,
    Tdee,
    Remaining,
    History,
    Warning,
    InvalidUserData,
    InvalidCalories,
    SelectUserFirst,
    UnknownCommand,
    InvalidUserId,
    ConfirmDelete,
    Goodbye,
}

impl Message {
    /// Look up the text for a locale
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en(),
            Locale::Uk => self.uk(),
        }
    }

    fn en(self) -> &'static str {
        match self {
            Message::Title => "Calorie tracker",
            Message::Prompt => "> ",
            Message::Gender => "Gender (m/f)",
            Message::Weight => "Weight (kg)",
            Message::Height => "Height (cm)",
            Message::Age => "Age",
            Message::Activity => "Activity",
            Message::Product => "Product name",
            Message::Grams => "Grams (blank for direct calories)",
            Message::CaloriesPer100g => "Calories per 100 g",
            Message::Calories => "Calories",
            Message::UserId => "User ID",
            Message::UserCreated => "User created",
            Message::UserDeleted => "User deleted",
            Message::UserSelected => "Selected user",
            Message::NoUsers => "No users yet",
            Message::NoEntries => "No entries",
            Message::DailyTotal => "Total calories today",
            Message::Bmr => "BMR",
            Message::Tdee => "TDEE",
            Message::Remaining => "Remaining",
            Message::History => "All entries",
            Message::Warning => "Warning",
            Message::InvalidUserData => "Invalid user data",
            Message::InvalidCalories => "Invalid calorie amount",
            Message::SelectUserFirst => "Register or select a user first",
            Message::UnknownCommand => "Unknown command",
            Message::InvalidUserId => "User ID must be a whole number",
            Message::ConfirmDelete => "Delete this user and all entries? (y/n)",
            Message::Goodbye => "Bye",
        }
    }

    fn uk(self) -> &'static str {
        match self {
            Message::Title => "Калькулятор калорій",
            Message::Prompt => "> ",
            Message::Gender => "Стать (ч/ж)",
            Message::Weight => "Вага (кг)",
            Message::Height => "Зріст (см)",
            Message::Age => "Вік",
            Message::Activity => "Активність",
            Message::Product => "Назва продукту",
            Message::Grams => "Грами (порожньо для прямих калорій)",
            Message::CaloriesPer100g => "Калорії на 100 г",
            Message::Calories => "Калорії",
            Message::UserId => "ID користувача",
            Message::UserCreated => "Користувач створений",
            Message::UserDeleted => "Користувача видалено",
            Message::UserSelected => "Обраний користувач",
            Message::NoUsers => "Користувачів ще немає",
            Message::NoEntries => "Записів немає",
            Message::DailyTotal => "Загальна кількість калорій",
            Message::Bmr => "BMR",
            Message::Tdee => "TDEE",
            Message::Remaining => "Залишилось",
            Message::History => "Усі записи",
            Message::Warning => "Помилка",
            Message::InvalidUserData => "Невірні дані користувача",
            Message::InvalidCalories => "Невірна кількість калорій",
            Message::SelectUserFirst => "Спочатку зареєструй користувача",
            Message::UnknownCommand => "Невідома команда",
            Message::InvalidUserId => "ID користувача має бути цілим числом",
            Message::ConfirmDelete => "Видалити користувача і всі записи? (т/н)",
            Message::Goodbye => "До побачення",
        }
    }
}

/// Main menu line; the trend entry names the configured window
pub fn menu(locale: Locale, trend_days: u32) -> String {
    let trend = trend_phrase(locale, trend_days);
    match locale {
        Locale::En => format!(
            "[1] new user  [2] select user  [3] add food  [4] today  \
             [5] history  [6] {}  [7] delete user  [8] export  [0] quit",
            trend
        ),
        Locale::Uk => format!(
            "[1] новий користувач  [2] вибрати користувача  [3] додати продукт  \
             [4] сьогодні  [5] історія  [6] {}  [7] видалити користувача  [8] експорт  [0] вихід",
            trend
        ),
    }
}

/// Heading of the trend view, e.g. "Last 7 days"
pub fn trend_title(locale: Locale, days: u32) -> String {
    let phrase = trend_phrase(locale, days);
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => phrase,
    }
}

fn trend_phrase(locale: Locale, days: u32) -> String {
    match locale {
        Locale::En if days == 1 => "last 1 day".to_string(),
        Locale::En => format!("last {} days", days),
        Locale::Uk => {
            let (last, noun) = uk_days(days);
            format!("{} {} {}", last, days, noun)
        }
    }
}

/// Ukrainian agreement for "last N days"
fn uk_days(days: u32) -> (&'static str, &'static str) {
    let (ones, tens) = (days % 10, days % 100);
    if ones == 1 && tens != 11 {
        ("останній", "день")
    } else if (2..=4).contains(&ones) && !(12..=14).contains(&tens) {
        ("останні", "дні")
    } else {
        ("останні", "днів")
    }
}

/// Whether a yes/no answer is affirmative in either locale
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "т" | "так"
    )
}
