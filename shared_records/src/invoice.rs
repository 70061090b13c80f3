use chrono::NaiveDate;
use recordview::{FieldValue, ListRecord, ToFieldValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Overdue,
    Draft,
}

impl InvoiceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::Overdue => "Overdue",
            Self::Draft => "Draft",
        }
    }
}

impl ToFieldValue for InvoiceStatus {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(self.as_str()))
    }
}

/// An issued (or drafted) invoice. Drafts have no due date yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, ListRecord)]
#[listview(name_singular = "invoice", name_plural = "invoices")]
pub struct Invoice {
    #[listview(hidden)]
    pub id: Uuid,
    #[listview(sortable, searchable, label = "Invoice #", navigate = "/invoices/:id")]
    pub number: String,
    #[listview(sortable, searchable, filterable)]
    pub customer: String,
    #[listview(sortable, filterable, status)]
    pub status: InvoiceStatus,
    #[listview(sortable, range)]
    pub amount: Decimal,
    #[listview(sortable, range, label = "Issued")]
    pub issued_on: NaiveDate,
    #[listview(sortable, range, label = "Due")]
    pub due_on: Option<NaiveDate>,
}
