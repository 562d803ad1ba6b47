use super::*;

fn valid_product() -> ProductInput {
    ProductInput {
        name: "Linen Shirt".into(),
        description: "Breathable summer shirt".into(),
        price: Some(49.5),
        category: "shirts".into(),
        images: vec!["https://cdn.example.test/shirt.jpg".into()],
        colors: Some(vec![ColorInput { name: "Sand".into(), hex_code: "#c2b280".into() }]),
        sizes: Some(vec![SizeInput { size: "M".into(), stock: Some(4) }]),
    }
}

// =============================================================================
// review
// =============================================================================

#[test]
fn review_out_of_range_rating_and_short_comment_yield_two_errors() {
    let input = ReviewInput { rating: Some(6.0), comment: Some("short".into()), photos: None };
    let result = validate_review(&input);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].contains("Rating"));
    assert!(result.errors[1].contains("at least 10"));
}

#[test]
fn review_accepts_boundary_values() {
    for rating in [1.0, 5.0] {
        let input = ReviewInput { rating: Some(rating), comment: Some("  ten chars!  ".into()), photos: None };
        assert!(validate_review(&input).is_valid, "rating {rating} should pass");
    }
}

#[test]
fn review_rejects_fractional_rating() {
    let input = ReviewInput { rating: Some(4.5), comment: Some("A perfectly fine comment".into()), photos: None };
    assert_eq!(validate_review(&input).errors.len(), 1);
}

#[test]
fn review_comment_length_counts_trimmed_text() {
    let input = ReviewInput { rating: Some(3.0), comment: Some("   nine char   ".into()), photos: None };
    let result = validate_review(&input);
    assert_eq!(result.errors, vec!["Comment must be at least 10 characters".to_owned()]);
}

#[test]
fn review_missing_fields_reported() {
    let result = validate_review(&ReviewInput::default());
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.contains(&"Comment is required".to_owned()));
}

#[test]
fn review_caps_photos_at_five() {
    let photos = (0..6).map(|i| format!("p{i}.jpg")).collect();
    let input = ReviewInput { rating: Some(5.0), comment: Some("Great fit and colour".into()), photos: Some(photos) };
    let result = validate_review(&input);
    assert_eq!(result.errors, vec!["A review can include at most 5 photos".to_owned()]);
}

// =============================================================================
// hex color
// =============================================================================

#[test]
fn format_hex_color_expands_shorthand_and_adds_hash() {
    assert_eq!(format_hex_color("abc"), "#AABBCC");
    assert_eq!(format_hex_color("#1a2b3c"), "#1A2B3C");
    assert_eq!(format_hex_color(" #f0a "), "#FF00AA");
}

#[test]
fn format_hex_color_leaves_garbage_invalid() {
    let formatted = format_hex_color("zz");
    assert_eq!(formatted, "#ZZ");
    assert!(!is_valid_hex_color(&formatted));
}

#[test]
fn hex_color_parse_is_case_insensitive_and_uppercases() {
    let color: HexColor = "#a1b2c3".parse().unwrap();
    assert_eq!(color.as_str(), "#A1B2C3");
    assert_eq!(color.to_string(), "#A1B2C3");
}

#[test]
fn hex_color_rejects_shorthand_and_missing_hash() {
    assert!(!is_valid_hex_color("#abc"));
    assert!(!is_valid_hex_color("aabbcc"));
    assert!(!is_valid_hex_color("#aabbcg"));
    assert!(!is_valid_hex_color("#aabbccdd"));
}

#[test]
fn hex_color_deserializes_through_validation() {
    let ok: HexColor = serde_json::from_str(r##""#00ff00""##).unwrap();
    assert_eq!(ok.as_str(), "#00FF00");
    assert!(serde_json::from_str::<HexColor>(r#""green""#).is_err());
}

// =============================================================================
// product
// =============================================================================

#[test]
fn product_valid_passes() {
    assert_eq!(validate_product(&valid_product()), ValidationResult::from_errors(Vec::new()));
}

#[test]
fn product_empty_reports_every_required_field() {
    let result = validate_product(&ProductInput::default());
    assert_eq!(
        result.errors,
        vec![
            "Product name is required",
            "Description is required",
            "Price must be a positive number",
            "Category is required",
            "At least one image is required",
        ]
    );
}

#[test]
fn product_rejects_zero_and_nan_price() {
    for price in [0.0, -1.0, f64::NAN] {
        let input = ProductInput { price: Some(price), ..valid_product() };
        assert_eq!(validate_product(&input).errors.len(), 1, "price {price}");
    }
}

#[test]
fn product_validates_color_entries() {
    let input = ProductInput {
        colors: Some(vec![
            ColorInput { name: String::new(), hex_code: "#fff".into() },
            ColorInput { name: "Navy".into(), hex_code: String::new() },
        ]),
        ..valid_product()
    };
    let result = validate_product(&input);
    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.errors[0], "Color 1: name is required");
    assert!(result.errors[1].starts_with("Color 1: `#fff` is not a valid hex color"));
    assert_eq!(result.errors[2], "Color 2: hex code is required");
}

#[test]
fn product_validates_size_entries() {
    let input = ProductInput {
        sizes: Some(vec![SizeInput { size: " ".into(), stock: Some(-2) }]),
        ..valid_product()
    };
    let result = validate_product(&input);
    assert_eq!(
        result.errors,
        vec!["Size 1: size label is required", "Size 1: stock must be zero or more"]
    );
}

#[test]
fn validation_result_tracks_validity() {
    let result = ValidationResult::from_errors(Vec::new());
    assert!(result.is_valid);
    assert_eq!(result.into_result(), Ok(()));
    let result = ValidationResult::from_errors(vec!["bad".into()]);
    assert!(!result.is_valid);
    assert_eq!(result.into_result(), Err(vec!["bad".to_owned()]));
}
