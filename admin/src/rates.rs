//! Rate editing helpers for the CLI.
//!
//! Conditions are given as `kind=value` arguments, e.g.
//! `--condition min_weight=2 --condition max_weight=10`. They are added one
//! at a time through [`ConditionSet::add`], in the order given, so the same
//! rules the admin form enforces while typing apply here. The finished set is
//! then checked as a whole before it is sent.

use storefront::rate::{Condition, ConditionKind, ConditionSet, RateType};

use crate::AdminError;

/// Parse one `kind=value` argument.
///
/// # Errors
///
/// Returns [`AdminError::Invalid`] if the kind is unknown or the value is not a number.
pub fn parse_condition(arg: &str) -> Result<Condition, AdminError> {
    let (kind, value) = arg
        .split_once('=')
        .ok_or_else(|| AdminError::Invalid(vec![format!("condition `{arg}` must look like kind=value")]))?;
    let kind = kind.trim().parse::<ConditionKind>().map_err(|e| AdminError::Invalid(vec![e]))?;
    let value = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AdminError::Invalid(vec![format!("condition value `{}` is not a number", value.trim())]))?;
    Ok(Condition::new(kind, value))
}

/// Build a checked condition set for a rate of `rate_type`.
///
/// # Errors
///
/// Returns [`AdminError::Invalid`] for unparsable arguments or conditions on
/// a flat rate, [`AdminError::Condition`] for the first add-time conflict, and
/// [`AdminError::Invalid`] listing every whole-set problem.
pub fn build_conditions(rate_type: RateType, args: &[String]) -> Result<ConditionSet, AdminError> {
    if !rate_type.uses_conditions() && !args.is_empty() {
        return Err(AdminError::Invalid(vec!["flat rates cannot have conditions".to_owned()]));
    }

    let mut set = ConditionSet::new();
    for arg in args {
        set.add(parse_condition(arg)?)?;
    }

    let problems = set.validate_all();
    if problems.is_empty() {
        Ok(set)
    } else {
        Err(AdminError::Invalid(problems.iter().map(ToString::to_string).collect()))
    }
}

/// One-line summary of a condition set, e.g. `Minimum weight 2, Maximum weight 10`.
#[must_use]
pub fn describe_conditions(set: &ConditionSet) -> String {
    if set.is_empty() {
        return "always".to_owned();
    }
    set.as_slice()
        .iter()
        .map(|c| format!("{} {}", c.kind.label(), c.value))
        .collect::<Vec<_>>()
        .join(", ")
}
