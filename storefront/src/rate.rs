//! Shipping zones, rates and the rate condition engine.
//!
//! DESIGN
//! ======
//! A rate belongs to one zone and may carry threshold conditions
//! (min/max weight, min/max price) that gate whether it applies to a parcel.
//! The admin form edits conditions through [`ConditionSet`], which rejects
//! duplicate kinds and an inverted max at add time; [`ConditionSet::validate_all`]
//! re-checks the whole set before the rate is persisted as one document.
//!
//! Adding a `min_*` after its `max_*` is not checked at add time, only by
//! `validate_all`. Callers must run the whole-set check before saving.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::format_delivery_time;
use crate::validate::ValidationResult;

// =============================================================================
// CONDITION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    MinWeight,
    MaxWeight,
    MinPrice,
    MaxPrice,
}

/// The quantity a condition constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Weight,
    Price,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weight => "weight",
            Self::Price => "price",
        })
    }
}

impl ConditionKind {
    pub const ALL: [Self; 4] = [Self::MinWeight, Self::MaxWeight, Self::MinPrice, Self::MaxPrice];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MinWeight => "min_weight",
            Self::MaxWeight => "max_weight",
            Self::MinPrice => "min_price",
            Self::MaxPrice => "max_price",
        }
    }

    /// Human label used in form error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MinWeight => "Minimum weight",
            Self::MaxWeight => "Maximum weight",
            Self::MinPrice => "Minimum price",
            Self::MaxPrice => "Maximum price",
        }
    }

    #[must_use]
    pub fn dimension(self) -> Dimension {
        match self {
            Self::MinWeight | Self::MaxWeight => Dimension::Weight,
            Self::MinPrice | Self::MaxPrice => Dimension::Price,
        }
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        matches!(self, Self::MaxWeight | Self::MaxPrice)
    }

    /// The opposite bound on the same dimension.
    #[must_use]
    pub fn counterpart(self) -> Self {
        match self {
            Self::MinWeight => Self::MaxWeight,
            Self::MaxWeight => Self::MinWeight,
            Self::MinPrice => Self::MaxPrice,
            Self::MaxPrice => Self::MinPrice,
        }
    }
}

impl FromStr for ConditionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown condition type: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    pub value: f64,
}

impl Condition {
    #[must_use]
    pub fn new(kind: ConditionKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Whether a parcel of `weight` and order `subtotal` passes this threshold.
    /// Both bounds are inclusive.
    #[must_use]
    pub fn admits(&self, weight: f64, subtotal: f64) -> bool {
        match self.kind {
            ConditionKind::MinWeight => weight >= self.value,
            ConditionKind::MaxWeight => weight <= self.value,
            ConditionKind::MinPrice => subtotal >= self.value,
            ConditionKind::MaxPrice => subtotal <= self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("A {} condition already exists", .0.label().to_lowercase())]
    DuplicateKind(ConditionKind),
    #[error("Maximum {0} must be greater than minimum {0}")]
    MaxNotAboveMin(Dimension),
    #[error("{} cannot be negative", .0.label())]
    Negative(ConditionKind),
}

// =============================================================================
// CONDITION SET
// =============================================================================

/// Ordered conditions for the rate being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list without checking it. Use [`Self::validate_all`]
    /// and [`Self::duplicate_kinds`] before trusting the result.
    #[must_use]
    pub fn from_vec(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Value of the first condition of `kind`, if present.
    #[must_use]
    pub fn value_of(&self, kind: ConditionKind) -> Option<f64> {
        self.conditions.iter().find(|c| c.kind == kind).map(|c| c.value)
    }

    fn values_of(&self, kind: ConditionKind) -> impl Iterator<Item = f64> + '_ {
        self.conditions.iter().filter(move |c| c.kind == kind).map(|c| c.value)
    }

    /// Append a condition.
    ///
    /// # Errors
    ///
    /// [`ConditionError::DuplicateKind`] if the kind is already present;
    /// [`ConditionError::MaxNotAboveMin`] if a max is added at or below the
    /// existing min of its dimension.
    pub fn add(&mut self, condition: Condition) -> Result<(), ConditionError> {
        if self.value_of(condition.kind).is_some() {
            return Err(ConditionError::DuplicateKind(condition.kind));
        }
        if condition.kind.is_max()
            && let Some(min) = self.value_of(condition.kind.counterpart())
            && condition.value <= min
        {
            return Err(ConditionError::MaxNotAboveMin(condition.kind.dimension()));
        }
        self.conditions.push(condition);
        Ok(())
    }

    /// Remove by position. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<Condition> {
        (index < self.conditions.len()).then(|| self.conditions.remove(index))
    }

    /// Replace in place without re-validating.
    pub fn update(&mut self, index: usize, condition: Condition) -> bool {
        match self.conditions.get_mut(index) {
            Some(slot) => {
                *slot = condition;
                true
            }
            None => false,
        }
    }

    /// Kinds that appear more than once, in first-seen order.
    #[must_use]
    pub fn duplicate_kinds(&self) -> Vec<ConditionKind> {
        let mut seen = Vec::with_capacity(self.conditions.len());
        let mut dupes = Vec::new();
        for condition in &self.conditions {
            if seen.contains(&condition.kind) {
                if !dupes.contains(&condition.kind) {
                    dupes.push(condition.kind);
                }
            } else {
                seen.push(condition.kind);
            }
        }
        dupes
    }

    /// Whole-set consistency check. Empty when the set is consistent.
    #[must_use]
    pub fn validate_all(&self) -> Vec<ConditionError> {
        let mut errors: Vec<ConditionError> = self
            .conditions
            .iter()
            .filter(|c| c.value < 0.0)
            .map(|c| ConditionError::Negative(c.kind))
            .collect();

        for (min_kind, dimension) in [(ConditionKind::MinWeight, Dimension::Weight), (ConditionKind::MinPrice, Dimension::Price)] {
            // Every pair is checked: `update` may have left repeated kinds.
            let inverted = self
                .values_of(min_kind)
                .any(|min| self.values_of(min_kind.counterpart()).any(|max| max <= min));
            if inverted {
                errors.push(ConditionError::MaxNotAboveMin(dimension));
            }
        }
        errors
    }

    /// Whether every condition admits the parcel.
    #[must_use]
    pub fn admits(&self, weight: f64, subtotal: f64) -> bool {
        self.conditions.iter().all(|c| c.admits(weight, subtotal))
    }
}

// =============================================================================
// RATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    Flat,
    Weight,
    Price,
}

impl RateType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Weight => "weight",
            Self::Price => "price",
        }
    }

    /// Flat rates never carry conditions.
    #[must_use]
    pub fn uses_conditions(self) -> bool {
        !matches!(self, Self::Flat)
    }
}

impl FromStr for RateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "weight" => Ok(Self::Weight),
            "price" => Ok(Self::Price),
            other => Err(format!("unknown rate type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedDays {
    pub min: i32,
    pub max: i32,
}

impl Default for EstimatedDays {
    fn default() -> Self {
        Self { min: 3, max: 7 }
    }
}

fn default_true() -> bool {
    true
}

/// Editable fields of a shipping rate, as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDraft {
    pub name: String,
    pub rate_type: RateType,
    pub base_rate: f64,
    #[serde(default)]
    pub conditions: ConditionSet,
    #[serde(default)]
    pub additional_fee: f64,
    #[serde(default)]
    pub free_shipping_threshold: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub estimated_days: EstimatedDays,
}

impl RateDraft {
    /// Trim the name and drop conditions from flat rates.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_owned();
        if !self.rate_type.uses_conditions() {
            self.conditions = ConditionSet::new();
        }
    }

    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Rate name is required".to_owned());
        }
        if !self.base_rate.is_finite() || self.base_rate < 0.0 {
            errors.push("Base rate cannot be negative".to_owned());
        }
        if !self.additional_fee.is_finite() || self.additional_fee < 0.0 {
            errors.push("Additional fee cannot be negative".to_owned());
        }
        if self.free_shipping_threshold.is_some_and(|t| !t.is_finite() || t < 0.0) {
            errors.push("Free shipping threshold cannot be negative".to_owned());
        }

        let days = self.estimated_days;
        if days.min < 0 || days.max < 0 {
            errors.push("Estimated delivery days cannot be negative".to_owned());
        }
        if days.min > days.max {
            errors.push("Minimum delivery days cannot exceed maximum delivery days".to_owned());
        }

        if self.rate_type.uses_conditions() {
            errors.extend(
                self.conditions
                    .duplicate_kinds()
                    .into_iter()
                    .map(|kind| ConditionError::DuplicateKind(kind).to_string()),
            );
            errors.extend(self.conditions.validate_all().iter().map(ToString::to_string));
        }

        ValidationResult::from_errors(errors)
    }
}

/// Persisted shipping rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub id: Uuid,
    pub zone_id: Uuid,
    pub name: String,
    pub rate_type: RateType,
    pub base_rate: f64,
    pub conditions: ConditionSet,
    pub additional_fee: f64,
    pub free_shipping_threshold: Option<f64>,
    pub is_active: bool,
    pub estimated_days: EstimatedDays,
}

impl ShippingRate {
    #[must_use]
    pub fn from_draft(id: Uuid, zone_id: Uuid, draft: RateDraft) -> Self {
        Self {
            id,
            zone_id,
            name: draft.name,
            rate_type: draft.rate_type,
            base_rate: draft.base_rate,
            conditions: draft.conditions,
            additional_fee: draft.additional_fee,
            free_shipping_threshold: draft.free_shipping_threshold,
            is_active: draft.is_active,
            estimated_days: draft.estimated_days,
        }
    }

    /// Shipping cost for a parcel, or `None` when this rate does not apply.
    #[must_use]
    pub fn quote(&self, weight: f64, subtotal: f64) -> Option<f64> {
        if !self.is_active {
            return None;
        }
        if self.rate_type.uses_conditions() && !self.conditions.admits(weight, subtotal) {
            return None;
        }
        if self.free_shipping_threshold.is_some_and(|threshold| subtotal >= threshold) {
            return Some(0.0);
        }
        Some(self.base_rate + self.additional_fee)
    }
}

// =============================================================================
// ZONE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDraft {
    pub name: String,
    pub countries: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl ZoneDraft {
    /// Trim names, uppercase country codes and drop repeats.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_owned();
        let mut countries: Vec<String> = Vec::with_capacity(self.countries.len());
        for code in &self.countries {
            let code = code.trim().to_ascii_uppercase();
            if !code.is_empty() && !countries.contains(&code) {
                countries.push(code);
            }
        }
        self.countries = countries;
        self.regions = self
            .regions
            .iter()
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty())
            .collect();
    }

    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Zone name is required".to_owned());
        }
        if self.countries.is_empty() {
            errors.push("At least one country is required".to_owned());
        }
        for code in &self.countries {
            let code = code.trim();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                errors.push(format!("`{code}` is not a two-letter country code"));
            }
        }
        ValidationResult::from_errors(errors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    pub id: Uuid,
    pub name: String,
    pub countries: Vec<String>,
    pub regions: Vec<String>,
    pub is_active: bool,
    pub display_order: i32,
}

impl ShippingZone {
    #[must_use]
    pub fn from_draft(id: Uuid, draft: ZoneDraft) -> Self {
        Self {
            id,
            name: draft.name,
            countries: draft.countries,
            regions: draft.regions,
            is_active: draft.is_active,
            display_order: draft.display_order,
        }
    }

    #[must_use]
    pub fn covers(&self, country: &str) -> bool {
        let country = country.trim();
        self.countries.iter().any(|c| c.eq_ignore_ascii_case(country))
    }
}

// =============================================================================
// QUOTING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rate_id: Uuid,
    pub zone_id: Uuid,
    pub zone_name: String,
    pub rate_name: String,
    pub cost: f64,
    pub delivery: String,
}

/// All rates that apply to a parcel bound for `country`, cheapest first.
///
/// Only active zones covering the country are considered; zones are visited
/// in `display_order` so ties keep the admin's ordering.
#[must_use]
pub fn quote_rates(
    zones: &[ShippingZone],
    rates: &[ShippingRate],
    country: &str,
    weight: f64,
    subtotal: f64,
) -> Vec<RateQuote> {
    let mut zones: Vec<&ShippingZone> = zones.iter().filter(|z| z.is_active && z.covers(country)).collect();
    zones.sort_by_key(|z| z.display_order);

    let mut quotes = Vec::new();
    for zone in zones {
        for rate in rates.iter().filter(|r| r.zone_id == zone.id) {
            if let Some(cost) = rate.quote(weight, subtotal) {
                quotes.push(RateQuote {
                    rate_id: rate.id,
                    zone_id: zone.id,
                    zone_name: zone.name.clone(),
                    rate_name: rate.name.clone(),
                    cost,
                    delivery: format_delivery_time(rate.estimated_days.min, rate.estimated_days.max),
                });
            }
        }
    }
    quotes.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    quotes
}

#[cfg(test)]
#[path = "rate_test.rs"]
mod tests;
