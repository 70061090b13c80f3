use chrono::NaiveDate;
use recordview::{FieldValue, ListRecord, ToFieldValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl CustomerStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl ToFieldValue for CustomerStatus {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(self.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, ListRecord)]
#[listview(name_singular = "customer", name_plural = "customers")]
pub struct Customer {
    #[listview(hidden)]
    pub id: Uuid,
    #[listview(sortable, searchable, navigate = "/customers/:id")]
    pub name: String,
    #[listview(sortable, searchable)]
    pub email: String,
    #[listview(searchable)]
    pub company: Option<String>,
    #[listview(sortable, filterable, status)]
    pub status: CustomerStatus,
    #[listview(sortable, range)]
    pub balance: Decimal,
    #[listview(sortable, range, label = "Customer Since")]
    pub created_at: NaiveDate,
}
