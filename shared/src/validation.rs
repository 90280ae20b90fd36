//! Input validation functions
//!
//! Turns the raw text of the user and entry forms into validated values.
//! Uses both custom validators and the `validator` crate for derive macros.

use validator::Validate;

use crate::errors::FormError;
use crate::models::{EntryForm, NewEntry, NewUser, Portion, UserForm};
use crate::nutrition::calories_from_grams;

/// Parse a decimal field; accepts a comma as the decimal separator
pub fn parse_number(field: &'static str, input: &str) -> Result<f64, FormError> {
    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| FormError::NotANumber { field })?;
    if value.is_nan() || value.is_infinite() {
        return Err(FormError::NotANumber { field });
    }
    Ok(value)
}

/// Parse a whole-number field
pub fn parse_integer(field: &'static str, input: &str) -> Result<i32, FormError> {
    input
        .trim()
        .parse()
        .map_err(|_| FormError::NotANumber { field })
}

/// Validate that a value is strictly positive
pub fn validate_positive(field: &'static str, value: f64) -> Result<(), FormError> {
    if value <= 0.0 {
        return Err(FormError::invalid(field, "must be positive"));
    }
    Ok(())
}

/// Largest calorie amount a single entry may carry
pub const MAX_ENTRY_CALORIES: f64 = 50000.0;

/// Validate the calories of one entry, whether typed or derived from grams
pub fn validate_calories(calories: f64) -> Result<(), FormError> {
    if calories < 0.0 {
        return Err(FormError::invalid("calories", "cannot be negative"));
    }
    if !calories.is_finite() || calories > MAX_ENTRY_CALORIES {
        return Err(FormError::invalid("calories", "unreasonably high"));
    }
    Ok(())
}

/// Validate a product name
pub fn validate_product_name(name: &str) -> Result<(), FormError> {
    if name.trim().is_empty() {
        return Err(FormError::invalid("product", "cannot be empty"));
    }
    if name.chars().count() > 200 {
        return Err(FormError::invalid("product", "too long"));
    }
    Ok(())
}

// ============================================================================
// User Form
// ============================================================================

/// Map the struct field names reported by `validator` to form field names
fn form_field(struct_field: &str) -> &'static str {
    match struct_field {
        "weight_kg" => "weight",
        "height_cm" => "height",
        "age_years" => "age",
        "activity" => "activity",
        _ => "gender",
    }
}

/// Validate registration data
pub fn validate_new_user(user: &NewUser) -> Result<(), FormError> {
    let Err(errors) = user.validate() else {
        return Ok(());
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let Some((field, errs)) = fields.into_iter().next() else {
        return Ok(());
    };
    let message = errs
        .first()
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .unwrap_or_else(|| "invalid".to_string());

    Err(FormError::invalid(form_field(&field), message))
}

impl UserForm {
    /// Parse and validate the raw form
    ///
    /// Gender and activity are kept as typed; unknown values are not errors.
    pub fn parse(&self) -> Result<NewUser, FormError> {
        let user = NewUser {
            gender: self.gender.trim().to_string(),
            weight_kg: parse_number("weight", &self.weight)?,
            height_cm: parse_number("height", &self.height)?,
            age_years: parse_integer("age", &self.age)?,
            activity: self.activity.trim().to_string(),
        };
        validate_new_user(&user)?;
        Ok(user)
    }
}

// ============================================================================
// Entry Form
// ============================================================================

impl EntryForm {
    /// Parse and validate the raw form
    ///
    /// A non-blank `grams` selects the weighed model, which requires a
    /// positive density. Otherwise `calories` is the direct value. Either
    /// way the resulting calories stay within `MAX_ENTRY_CALORIES`.
    pub fn parse(&self) -> Result<NewEntry, FormError> {
        let product = self.product.trim().to_string();
        validate_product_name(&product)?;

        let portion = if !self.grams.trim().is_empty() {
            let grams = parse_number("grams", &self.grams)?;
            let calories_per_100g = parse_number("calories_per_100g", &self.calories_per_100g)?;
            validate_positive("grams", grams)?;
            validate_positive("calories_per_100g", calories_per_100g)?;
            validate_calories(calories_from_grams(grams, calories_per_100g))?;
            Portion::Weighed {
                grams,
                calories_per_100g,
            }
        } else {
            let calories = parse_number("calories", &self.calories)?;
            validate_calories(calories)?;
            Portion::Direct { calories }
        };

        Ok(NewEntry { product, portion })
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map form field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "gender" => "Gender",
        "weight" => "Weight",
        "height" => "Height",
        "age" => "Age",
        "activity" => "Activity",
        "product" => "Product",
        "grams" => "Grams",
        "calories_per_100g" => "Calories per 100 g",
        "calories" => "Calories",
        _ => field_name,
    }
}

/// Whether a form field belongs to the user form
pub fn is_user_field(field_name: &str) -> bool {
    matches!(field_name, "gender" | "weight" | "height" | "age" | "activity")
}
