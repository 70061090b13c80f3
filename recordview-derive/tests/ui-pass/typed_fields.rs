//! Test chrono, decimal and uuid fields with ranges, renames and exclusions

use chrono::NaiveDate;
use recordview::{ListRecord, ListResource, RangeKind};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(ListRecord)]
#[listview(name_singular = "invoice", name_plural = "invoices")]
pub struct Invoice {
    #[listview(hidden)]
    pub id: Uuid,
    #[listview(sortable, searchable, label = "Invoice #", navigate = "/invoices/:id")]
    pub number: String,
    #[listview(sortable, range)]
    pub amount: Decimal,
    #[listview(range)]
    pub issued_on: NaiveDate,
    #[listview(range = "date", rename = "due")]
    pub due_on: Option<NaiveDate>,
    #[listview(skip)]
    pub internal_note: String,
}

fn main() {
    let invoice = Invoice {
        id: Uuid::from_u128(1),
        number: "INV-001".to_string(),
        amount: Decimal::new(12_550, 2),
        issued_on: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        due_on: None,
        internal_note: "do not show".to_string(),
    };

    assert_eq!(invoice.field("amount").and_then(|v| v.as_number()), Some(125.5));
    assert!(invoice.field("due").is_none());
    assert!(invoice.field("due_on").is_none());
    assert!(invoice.field("internal_note").is_none());
    assert_eq!(
        invoice.field("id").unwrap().to_text(),
        "00000000-0000-0000-0000-000000000001"
    );

    let schema = Invoice::list_schema();
    assert!(schema.find_column("id").is_none());
    assert_eq!(schema.find_column("number").unwrap().name, "Invoice #");
    assert_eq!(schema.range_kind("amount"), Some(RangeKind::Number));
    assert_eq!(schema.range_kind("issued_on"), Some(RangeKind::Date));
    assert_eq!(schema.range_kind("due"), Some(RangeKind::Date));
    assert_eq!(
        schema.find_column("number").unwrap().navigation_path(&invoice).as_deref(),
        Some("/invoices/00000000-0000-0000-0000-000000000001")
    );
    assert!(schema.validate().is_ok());
}
