//! Display formatting for prices, weights and delivery windows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number and currency conventions for one storefront locale.
///
/// Only the en-US, en-GB and de-DE presets exist; other tags have no
/// preset and callers fall back to [`Locale::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    pub symbol: &'static str,
    pub symbol_after: bool,
    pub group_separator: char,
    pub decimal_separator: char,
}

impl Locale {
    pub const EN_US: Self =
        Self { tag: "en-US", symbol: "$", symbol_after: false, group_separator: ',', decimal_separator: '.' };
    pub const EN_GB: Self =
        Self { tag: "en-GB", symbol: "£", symbol_after: false, group_separator: ',', decimal_separator: '.' };
    pub const DE_DE: Self =
        Self { tag: "de-DE", symbol: "€", symbol_after: true, group_separator: '.', decimal_separator: ',' };

    const KNOWN: [Self; 3] = [Self::EN_US, Self::EN_GB, Self::DE_DE];

    /// Look up a preset by BCP-47 tag, case-insensitively.
    #[must_use]
    pub fn for_tag(tag: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|l| l.tag.eq_ignore_ascii_case(tag.trim()))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Format `amount` with two decimals, digit grouping and currency symbol,
/// following one of the three [`Locale`] presets. Non-finite input is
/// treated as zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_currency(amount: f64, locale: &Locale) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;

    let whole = group_digits(cents / 100, locale.group_separator);
    let number = format!("{whole}{}{:02}", locale.decimal_separator, cents % 100);

    let sign = if negative { "-" } else { "" };
    if locale.symbol_after {
        format!("{sign}{number} {}", locale.symbol)
    } else {
        format!("{sign}{}{number}", locale.symbol)
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    G,
    Lb,
    Oz,
}

impl WeightUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::G => "g",
            Self::Lb => "lb",
            Self::Oz => "oz",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[must_use]
pub fn format_weight(weight: f64, unit: WeightUnit) -> String {
    format!("{weight:.2} {unit}")
}

/// `"3 business day"` when the window is a single day, else `"2-5 business days"`.
#[must_use]
pub fn format_delivery_time(min_days: i32, max_days: i32) -> String {
    if min_days == max_days {
        format!("{min_days} business day")
    } else {
        format!("{min_days}-{max_days} business days")
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
