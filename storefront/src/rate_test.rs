use super::*;

fn weight_draft(conditions: Vec<Condition>) -> RateDraft {
    RateDraft {
        name: "Standard".into(),
        rate_type: RateType::Weight,
        base_rate: 5.0,
        conditions: ConditionSet::from_vec(conditions),
        additional_fee: 1.5,
        free_shipping_threshold: None,
        is_active: true,
        estimated_days: EstimatedDays { min: 2, max: 5 },
    }
}

fn zone(name: &str, countries: &[&str], display_order: i32) -> ShippingZone {
    ShippingZone {
        id: Uuid::new_v4(),
        name: name.into(),
        countries: countries.iter().map(|c| (*c).to_owned()).collect(),
        regions: Vec::new(),
        is_active: true,
        display_order,
    }
}

// =============================================================================
// ConditionSet::add / remove / update
// =============================================================================

#[test]
fn add_rejects_second_condition_of_same_kind() {
    for kind in ConditionKind::ALL {
        let mut set = ConditionSet::new();
        set.add(Condition::new(kind, 1.0)).unwrap();
        let err = set.add(Condition::new(kind, 2.0)).unwrap_err();
        assert_eq!(err, ConditionError::DuplicateKind(kind));
        assert_eq!(set.len(), 1);
    }
}

#[test]
fn add_rejects_max_at_or_below_min() {
    let mut set = ConditionSet::new();
    set.add(Condition::new(ConditionKind::MinWeight, 2.0)).unwrap();
    assert_eq!(
        set.add(Condition::new(ConditionKind::MaxWeight, 2.0)),
        Err(ConditionError::MaxNotAboveMin(Dimension::Weight))
    );
    assert_eq!(
        set.add(Condition::new(ConditionKind::MaxWeight, 1.0)),
        Err(ConditionError::MaxNotAboveMin(Dimension::Weight))
    );
    set.add(Condition::new(ConditionKind::MaxWeight, 2.5)).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn add_min_after_max_is_not_checked_until_validate_all() {
    let mut set = ConditionSet::new();
    set.add(Condition::new(ConditionKind::MaxPrice, 10.0)).unwrap();
    set.add(Condition::new(ConditionKind::MinPrice, 50.0)).unwrap();
    assert_eq!(set.validate_all(), vec![ConditionError::MaxNotAboveMin(Dimension::Price)]);
}

#[test]
fn max_check_only_looks_at_same_dimension() {
    let mut set = ConditionSet::new();
    set.add(Condition::new(ConditionKind::MinPrice, 100.0)).unwrap();
    set.add(Condition::new(ConditionKind::MaxWeight, 1.0)).unwrap();
    assert!(set.validate_all().is_empty());
}

#[test]
fn remove_by_position_and_ignore_out_of_range() {
    let mut set = ConditionSet::from_vec(vec![
        Condition::new(ConditionKind::MinWeight, 1.0),
        Condition::new(ConditionKind::MaxWeight, 3.0),
    ]);
    assert_eq!(set.remove(5), None);
    assert_eq!(set.remove(0), Some(Condition::new(ConditionKind::MinWeight, 1.0)));
    assert_eq!(set.as_slice(), &[Condition::new(ConditionKind::MaxWeight, 3.0)]);
}

#[test]
fn update_replaces_without_validation() {
    let mut set = ConditionSet::from_vec(vec![
        Condition::new(ConditionKind::MinWeight, 1.0),
        Condition::new(ConditionKind::MaxWeight, 3.0),
    ]);
    assert!(set.update(1, Condition::new(ConditionKind::MaxWeight, 0.5)));
    assert!(!set.update(2, Condition::new(ConditionKind::MinPrice, 0.5)));
    assert_eq!(set.value_of(ConditionKind::MaxWeight), Some(0.5));
    assert_eq!(set.validate_all(), vec![ConditionError::MaxNotAboveMin(Dimension::Weight)]);
}

#[test]
fn validate_all_sees_inversions_hidden_behind_a_repeated_kind() {
    let mut set = ConditionSet::new();
    set.add(Condition::new(ConditionKind::MinWeight, 1.0)).unwrap();
    set.add(Condition::new(ConditionKind::MaxWeight, 5.0)).unwrap();
    set.add(Condition::new(ConditionKind::MinPrice, 1.0)).unwrap();
    assert!(set.update(2, Condition::new(ConditionKind::MaxWeight, 0.5)));

    assert_eq!(set.duplicate_kinds(), vec![ConditionKind::MaxWeight]);
    let messages: Vec<String> = set.validate_all().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["Maximum weight must be greater than minimum weight"]);
}

// =============================================================================
// ConditionSet::validate_all
// =============================================================================

#[test]
fn validate_all_reports_negatives_then_inversions() {
    let set = ConditionSet::from_vec(vec![
        Condition::new(ConditionKind::MinWeight, -1.0),
        Condition::new(ConditionKind::MaxWeight, -2.0),
        Condition::new(ConditionKind::MinPrice, 20.0),
        Condition::new(ConditionKind::MaxPrice, 20.0),
    ]);
    let messages: Vec<String> = set.validate_all().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "Minimum weight cannot be negative",
            "Maximum weight cannot be negative",
            "Maximum weight must be greater than minimum weight",
            "Maximum price must be greater than minimum price",
        ]
    );
}

#[test]
fn validate_all_is_empty_exactly_when_consistent() {
    let values = [None, Some(-1.0), Some(0.0), Some(5.0), Some(10.0)];
    for min_w in values {
        for max_w in values {
            for min_p in values {
                for max_p in values {
                    let mut conditions = Vec::new();
                    for (kind, value) in [
                        (ConditionKind::MinWeight, min_w),
                        (ConditionKind::MaxWeight, max_w),
                        (ConditionKind::MinPrice, min_p),
                        (ConditionKind::MaxPrice, max_p),
                    ] {
                        if let Some(value) = value {
                            conditions.push(Condition::new(kind, value));
                        }
                    }
                    let any_negative = conditions.iter().any(|c| c.value < 0.0);
                    let inverted = |min: Option<f64>, max: Option<f64>| matches!((min, max), (Some(a), Some(b)) if b <= a);
                    let expect_ok = !any_negative && !inverted(min_w, max_w) && !inverted(min_p, max_p);

                    let set = ConditionSet::from_vec(conditions);
                    assert_eq!(set.validate_all().is_empty(), expect_ok, "{set:?}");
                }
            }
        }
    }
}

#[test]
fn duplicate_kinds_lists_each_repeated_kind_once() {
    let set = ConditionSet::from_vec(vec![
        Condition::new(ConditionKind::MinWeight, 1.0),
        Condition::new(ConditionKind::MinWeight, 2.0),
        Condition::new(ConditionKind::MinWeight, 3.0),
        Condition::new(ConditionKind::MaxPrice, 3.0),
    ]);
    assert_eq!(set.duplicate_kinds(), vec![ConditionKind::MinWeight]);
}

#[test]
fn condition_serializes_with_type_tag() {
    let json = serde_json::to_value(Condition::new(ConditionKind::MaxPrice, 99.0)).unwrap();
    assert_eq!(json, serde_json::json!({"type": "max_price", "value": 99.0}));
    let set: ConditionSet = serde_json::from_str(r#"[{"type":"min_weight","value":1}]"#).unwrap();
    assert_eq!(set.value_of(ConditionKind::MinWeight), Some(1.0));
}

#[test]
fn condition_kind_parses_wire_names() {
    assert_eq!("min_price".parse::<ConditionKind>(), Ok(ConditionKind::MinPrice));
    assert!("heaviest".parse::<ConditionKind>().is_err());
}

// =============================================================================
// RateDraft
// =============================================================================

#[test]
fn draft_validate_collects_rate_and_condition_errors() {
    let mut draft = weight_draft(vec![
        Condition::new(ConditionKind::MinWeight, 5.0),
        Condition::new(ConditionKind::MinWeight, 6.0),
        Condition::new(ConditionKind::MaxWeight, 1.0),
    ]);
    draft.name = "  ".into();
    draft.estimated_days = EstimatedDays { min: 6, max: 2 };

    let result = draft.validate();
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![
            "Rate name is required",
            "Minimum delivery days cannot exceed maximum delivery days",
            "A minimum weight condition already exists",
            "Maximum weight must be greater than minimum weight",
        ]
    );
}

#[test]
fn draft_rejects_negative_money_and_days() {
    let mut draft = weight_draft(Vec::new());
    draft.base_rate = -1.0;
    draft.additional_fee = -0.5;
    draft.free_shipping_threshold = Some(-10.0);
    draft.estimated_days = EstimatedDays { min: -1, max: 2 };
    assert_eq!(draft.validate().errors.len(), 4);
}

#[test]
fn flat_rate_normalize_drops_conditions() {
    let mut draft = weight_draft(vec![Condition::new(ConditionKind::MinWeight, -5.0)]);
    draft.rate_type = RateType::Flat;
    assert!(draft.validate().is_valid, "flat rates ignore conditions");
    draft.normalize();
    assert!(draft.conditions.is_empty());
}

#[test]
fn draft_defaults_when_fields_missing() {
    let draft: RateDraft = serde_json::from_str(r#"{"name":"Flat","rate_type":"flat","base_rate":4.99}"#).unwrap();
    assert!(draft.is_active);
    assert!(draft.conditions.is_empty());
    assert_eq!(draft.estimated_days, EstimatedDays { min: 3, max: 7 });
    assert!(draft.validate().is_valid);
}

// =============================================================================
// quoting
// =============================================================================

#[test]
fn quote_respects_conditions_and_free_threshold() {
    let mut draft = weight_draft(vec![
        Condition::new(ConditionKind::MinWeight, 1.0),
        Condition::new(ConditionKind::MaxWeight, 5.0),
    ]);
    draft.free_shipping_threshold = Some(100.0);
    let rate = ShippingRate::from_draft(Uuid::new_v4(), Uuid::new_v4(), draft);

    assert_eq!(rate.quote(0.5, 10.0), None);
    assert_eq!(rate.quote(1.0, 10.0), Some(6.5));
    assert_eq!(rate.quote(5.0, 10.0), Some(6.5));
    assert_eq!(rate.quote(5.1, 10.0), None);
    assert_eq!(rate.quote(2.0, 100.0), Some(0.0));
}

#[test]
fn inactive_rate_never_quotes() {
    let mut draft = weight_draft(Vec::new());
    draft.is_active = false;
    let rate = ShippingRate::from_draft(Uuid::new_v4(), Uuid::new_v4(), draft);
    assert_eq!(rate.quote(1.0, 1.0), None);
}

#[test]
fn quote_rates_filters_by_country_and_sorts_by_cost() {
    let domestic = zone("Domestic", &["US"], 0);
    let mut europe = zone("Europe", &["DE", "FR"], 1);
    let cheap = ShippingRate::from_draft(Uuid::new_v4(), domestic.id, weight_draft(Vec::new()));
    let mut express_draft = weight_draft(Vec::new());
    express_draft.name = "Express".into();
    express_draft.base_rate = 1.0;
    express_draft.estimated_days = EstimatedDays { min: 1, max: 1 };
    let express = ShippingRate::from_draft(Uuid::new_v4(), domestic.id, express_draft);
    let eu_rate = ShippingRate::from_draft(Uuid::new_v4(), europe.id, weight_draft(Vec::new()));

    let rates = vec![cheap.clone(), express.clone(), eu_rate];
    let quotes = quote_rates(&[domestic.clone(), europe.clone()], &rates, "us", 1.0, 20.0);
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].rate_id, express.id);
    assert_eq!(quotes[0].delivery, "1 business day");
    assert_eq!(quotes[1].rate_id, cheap.id);
    assert_eq!(quotes[1].delivery, "2-5 business days");

    europe.is_active = false;
    assert!(quote_rates(&[domestic, europe], &rates, "DE", 1.0, 20.0).is_empty());
}

// =============================================================================
// ZoneDraft
// =============================================================================

#[test]
fn zone_normalize_uppercases_and_dedups_countries() {
    let mut draft = ZoneDraft {
        name: " North America ".into(),
        countries: vec!["us".into(), " ca ".into(), "US".into(), String::new()],
        regions: vec![" West ".into(), "  ".into()],
        is_active: true,
        display_order: 0,
    };
    draft.normalize();
    assert_eq!(draft.name, "North America");
    assert_eq!(draft.countries, vec!["US", "CA"]);
    assert_eq!(draft.regions, vec!["West"]);
    assert!(draft.validate().is_valid);
}

#[test]
fn zone_validate_requires_name_and_two_letter_codes() {
    let draft = ZoneDraft {
        name: String::new(),
        countries: vec!["USA".into()],
        regions: Vec::new(),
        is_active: true,
        display_order: 0,
    };
    let result = draft.validate();
    assert_eq!(result.errors, vec!["Zone name is required", "`USA` is not a two-letter country code"]);
}
