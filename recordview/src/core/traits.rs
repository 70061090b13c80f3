use serde_json::{Map, Value};
use std::borrow::Cow;

use super::schema::ListSchema;
use super::value::FieldValue;

/// Read access to a record by field name.
///
/// The engine never interprets a record beyond this accessor. A field that
/// does not exist, or holds no value, is reported as `None` and is treated as
/// missing by filtering (excluded from ranges) and sorting (ordered last).
pub trait ListRecord {
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

/// A record type that carries its own list vocabulary.
///
/// Usually implemented through `#[derive(ListRecord)]`, which generates both
/// the field accessor and the schema from `#[listview(...)]` attributes.
pub trait ListResource: ListRecord {
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;

    /// Columns, filter and sort vocabulary for this record type.
    fn list_schema() -> ListSchema;
}

impl<T: ListRecord + ?Sized> ListRecord for &T {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

impl<T: ListRecord + ?Sized> ListRecord for Box<T> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

impl<T: ListRecord + ?Sized> ListRecord for std::sync::Arc<T> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

fn json_field_value(value: &Value) -> Option<FieldValue<'_>> {
    match value {
        Value::String(s) => Some(FieldValue::text(s)),
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::Bool(b) => Some(FieldValue::text(if *b { "true" } else { "false" })),
        // Nested structures have no scalar view
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl ListRecord for Map<String, Value> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).and_then(json_field_value)
    }
}

impl ListRecord for Value {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match self {
            Value::Object(map) => map.field(key),
            _ => None,
        }
    }
}

impl ListRecord for std::collections::HashMap<String, String> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(|value| FieldValue::Text(Cow::Borrowed(value.as_str())))
    }
}

impl ListRecord for std::collections::BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(|value| FieldValue::Text(Cow::Borrowed(value.as_str())))
    }
}
