use super::*;

#[test]
fn currency_us_groups_thousands() {
    assert_eq!(format_currency(1234.5, &Locale::EN_US), "$1,234.50");
    assert_eq!(format_currency(1_234_567.891, &Locale::EN_US), "$1,234,567.89");
    assert_eq!(format_currency(0.0, &Locale::EN_US), "$0.00");
}

#[test]
fn currency_de_swaps_separators_and_trails_symbol() {
    assert_eq!(format_currency(1234.56, &Locale::DE_DE), "1.234,56 €");
}

#[test]
fn currency_negative_and_negative_zero() {
    assert_eq!(format_currency(-12.346, &Locale::EN_GB), "-£12.35");
    assert_eq!(format_currency(-0.001, &Locale::EN_US), "$0.00");
}

#[test]
fn currency_non_finite_is_zero() {
    assert_eq!(format_currency(f64::NAN, &Locale::EN_US), "$0.00");
}

#[test]
fn locale_lookup_by_tag() {
    assert_eq!(Locale::for_tag("de-de"), Some(Locale::DE_DE));
    assert_eq!(Locale::for_tag("fr-FR"), None);
    assert_eq!(Locale::default(), Locale::EN_US);
}

#[test]
fn weight_has_two_decimals_and_suffix() {
    assert_eq!(format_weight(2.5, WeightUnit::Kg), "2.50 kg");
    assert_eq!(format_weight(16.0, WeightUnit::Oz), "16.00 oz");
}

#[test]
fn delivery_time_single_day_is_singular() {
    assert_eq!(format_delivery_time(3, 3), "3 business day");
}

#[test]
fn delivery_time_range_is_inclusive() {
    assert_eq!(format_delivery_time(2, 5), "2-5 business days");
}
