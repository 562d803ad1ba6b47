//! Form validators for reviews, colors and products.
//!
//! Every validator is synchronous and collects *all* problems instead of
//! stopping at the first one, so the admin form can show the whole list at
//! once. Messages are user-facing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;
pub const REVIEW_COMMENT_MIN_CHARS: usize = 10;
pub const REVIEW_MAX_PHOTOS: usize = 5;

// =============================================================================
// RESULT
// =============================================================================

/// Outcome of a validator: `is_valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }

    /// Convert into a `Result` so callers can use `?`.
    ///
    /// # Errors
    ///
    /// Returns the collected messages when validation failed.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.is_valid { Ok(()) } else { Err(self.errors) }
    }
}

// =============================================================================
// REVIEW
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
}

#[must_use]
pub fn validate_review(input: &ReviewInput) -> ValidationResult {
    let mut errors = Vec::new();

    match input.rating {
        Some(rating) if rating.fract() == 0.0 && (RATING_MIN..=RATING_MAX).contains(&rating) => {}
        _ => errors.push("Rating must be a whole number between 1 and 5".to_owned()),
    }

    let comment = input.comment.as_deref().map(str::trim).unwrap_or_default();
    if comment.is_empty() {
        errors.push("Comment is required".to_owned());
    } else if comment.chars().count() < REVIEW_COMMENT_MIN_CHARS {
        errors.push(format!("Comment must be at least {REVIEW_COMMENT_MIN_CHARS} characters"));
    }

    if let Some(photos) = &input.photos
        && photos.len() > REVIEW_MAX_PHOTOS
    {
        errors.push(format!("A review can include at most {REVIEW_MAX_PHOTOS} photos"));
    }

    ValidationResult::from_errors(errors)
}

// =============================================================================
// HEX COLOR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid hex color (#RRGGBB)")]
pub struct HexColorError(pub String);

/// A color in canonical `#RRGGBB` form, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_hexdigit());
        if valid { Ok(Self(s.to_ascii_uppercase())) } else { Err(HexColorError(s.to_owned())) }
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[must_use]
pub fn is_valid_hex_color(input: &str) -> bool {
    input.parse::<HexColor>().is_ok()
}

/// Normalize user-typed color input toward `#RRGGBB`.
///
/// Adds a missing `#`, expands `#RGB` shorthand and uppercases. Input that
/// is not hex at all is returned normalized but still invalid; run it
/// through [`HexColor::from_str`] to check.
#[must_use]
pub fn format_hex_color(input: &str) -> String {
    let digits = input.trim().trim_start_matches('#');
    let expanded: String = if digits.len() == 3 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_owned()
    };
    format!("#{}", expanded.to_ascii_uppercase())
}

// =============================================================================
// PRODUCT
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hex_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeInput {
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Product form payload as submitted by the admin console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Option<Vec<ColorInput>>,
    #[serde(default)]
    pub sizes: Option<Vec<SizeInput>>,
}

#[must_use]
pub fn validate_product(input: &ProductInput) -> ValidationResult {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push("Product name is required".to_owned());
    }
    if input.description.trim().is_empty() {
        errors.push("Description is required".to_owned());
    }
    match input.price {
        Some(price) if price.is_finite() && price > 0.0 => {}
        _ => errors.push("Price must be a positive number".to_owned()),
    }
    if input.category.trim().is_empty() {
        errors.push("Category is required".to_owned());
    }
    if input.images.iter().all(|url| url.trim().is_empty()) {
        errors.push("At least one image is required".to_owned());
    }

    for (i, color) in input.colors.iter().flatten().enumerate() {
        let n = i + 1;
        if color.name.trim().is_empty() {
            errors.push(format!("Color {n}: name is required"));
        }
        if color.hex_code.trim().is_empty() {
            errors.push(format!("Color {n}: hex code is required"));
        } else if let Err(err) = color.hex_code.parse::<HexColor>() {
            errors.push(format!("Color {n}: {err}"));
        }
    }

    for (i, size) in input.sizes.iter().flatten().enumerate() {
        let n = i + 1;
        if size.size.trim().is_empty() {
            errors.push(format!("Size {n}: size label is required"));
        }
        if size.stock.is_some_and(|stock| stock < 0) {
            errors.push(format!("Size {n}: stock must be zero or more"));
        }
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
