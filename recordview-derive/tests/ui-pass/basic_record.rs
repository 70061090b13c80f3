//! Test that a basic record compiles and exposes its fields and schema

use recordview::{FieldValue, ListRecord, ListResource};

#[derive(ListRecord)]
pub struct Customer {
    pub id: u32,
    #[listview(sortable, searchable)]
    pub name: String,
    #[listview(status, filterable)]
    pub status: String,
    pub company: Option<String>,
}

fn main() {
    let customer = Customer {
        id: 7,
        name: "Acme".to_string(),
        status: "Active".to_string(),
        company: None,
    };

    assert_eq!(customer.field("id"), Some(FieldValue::Number(7.0)));
    assert_eq!(customer.field("name").unwrap().to_text(), "Acme");
    assert!(customer.field("company").is_none());
    assert!(customer.field("missing").is_none());

    assert_eq!(Customer::RESOURCE_NAME_SINGULAR, "customer");
    assert_eq!(Customer::RESOURCE_NAME_PLURAL, "customers");

    let schema = Customer::list_schema();
    assert_eq!(schema.resource, "customers");
    assert_eq!(schema.columns.len(), 4);
    assert!(schema.is_sortable("name"));
    assert_eq!(schema.status_field.as_deref(), Some("status"));
    assert_eq!(schema.search_fields, vec!["name".to_string()]);
    assert!(schema.validate().is_ok());
}
