use super::*;
use time::macros::datetime;

fn item(name: &str, size: &str, color: &str, quantity: i32) -> InventoryItem {
    InventoryItem {
        id: Uuid::new_v4(),
        product_id: None,
        product_name: name.into(),
        size: size.into(),
        color: color.into(),
        quantity,
        location: "Warehouse A, Shelf 3".into(),
        last_updated: datetime!(2026-03-14 09:30:00 UTC),
    }
}

#[test]
fn status_thresholds() {
    assert_eq!(StockStatus::from_quantity(0, 5), StockStatus::OutOfStock);
    assert_eq!(StockStatus::from_quantity(-3, 5), StockStatus::OutOfStock);
    assert_eq!(StockStatus::from_quantity(5, 5), StockStatus::LowStock);
    assert_eq!(StockStatus::from_quantity(6, 5), StockStatus::InStock);
}

#[test]
fn summary_counts_stat_cards() {
    let items = vec![item("Tee", "M", "Black", 10), item("Tee", "L", "Black", 2), item("Cap", "", "Red", 0)];
    let summary = InventorySummary::from_items(&items, DEFAULT_LOW_STOCK_THRESHOLD);
    assert_eq!(summary, InventorySummary { total_items: 3, total_units: 12, low_stock: 1, out_of_stock: 1 });
}

#[test]
fn export_writes_headers_and_status_labels() {
    let mut buf = Vec::new();
    export_csv(&[item("Tee", "M", "Black", 3)], 5, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Product Name,Size,Color,Quantity,Status,Location,Last Updated"));
    assert_eq!(lines.next(), Some("Tee,M,Black,3,Low Stock,\"Warehouse A, Shelf 3\",2026-03-14T09:30:00Z"));
    assert_eq!(lines.next(), None);
}

#[test]
fn export_then_import_yields_equivalent_rows() {
    let items = vec![item("Linen \"Classic\" Shirt", "XL", "Sand", 12), item("Cap", "", "Red", 0)];
    let mut buf = Vec::new();
    export_csv(&items, DEFAULT_LOW_STOCK_THRESHOLD, &mut buf).unwrap();

    let report = import_csv(buf.as_slice()).unwrap();
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(report.rows.len(), items.len());
    for (row, original) in report.rows.iter().zip(&items) {
        assert!(row.matches(original));
        assert_eq!(row.quantity, original.quantity);
        assert_eq!(row.location, original.location);
        assert_eq!(row.last_updated, Some(original.last_updated));
    }
}

#[test]
fn import_reports_bad_rows_and_keeps_good_ones() {
    let sheet = "\
Product Name,Quantity,Location
Tee,4,Bin 1
,2,Bin 2
Hoodie,-1,Bin 3
Socks,7.0,Bin 4
Scarf,many,Bin 5
";
    let report = import_csv(sheet.as_bytes()).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].product_name, "Tee");
    assert_eq!(report.rows[1].quantity, 7);
    assert_eq!(
        report.errors,
        vec![
            "Row 3: Product Name is required",
            "Row 4: Quantity `-1` must be a whole number of zero or more",
            "Row 6: Quantity `many` must be a whole number of zero or more",
        ]
    );
}

#[test]
fn import_headers_are_case_insensitive_and_optional_columns_default() {
    let report = import_csv("product name,QUANTITY\nTee,1\n".as_bytes()).unwrap();
    let row = &report.rows[0];
    assert_eq!(row.size, "");
    assert_eq!(row.color, "");
    assert_eq!(row.last_updated, None);
}

#[test]
fn import_without_quantity_column_fails() {
    let err = import_csv("Product Name,Size\nTee,M\n".as_bytes()).unwrap_err();
    assert!(matches!(err, InventoryError::MissingColumn("Quantity")));
}

#[test]
fn import_rejects_bad_timestamp() {
    let report = import_csv("Product Name,Quantity,Last Updated\nTee,1,yesterday\n".as_bytes()).unwrap();
    assert_eq!(report.errors, vec!["Row 2: Last Updated `yesterday` is not a valid timestamp"]);
}
