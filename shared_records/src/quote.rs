use chrono::NaiveDate;
use recordview::{FieldValue, ListRecord, ToFieldValue};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
    Expired,
}

impl QuoteStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Accepted => "Accepted",
            Self::Declined => "Declined",
            Self::Expired => "Expired",
        }
    }
}

impl ToFieldValue for QuoteStatus {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(self.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, ListRecord)]
#[listview(name_singular = "quote", name_plural = "quotes")]
pub struct Quote {
    #[listview(hidden)]
    pub id: Uuid,
    #[listview(sortable, searchable, label = "Quote #", navigate = "/quotes/:id")]
    pub number: String,
    #[listview(sortable, searchable)]
    pub customer: String,
    #[listview(sortable, filterable, status)]
    pub status: QuoteStatus,
    #[listview(sortable, range)]
    pub total: f64,
    #[listview(sortable, range, label = "Expires")]
    pub expires_on: NaiveDate,
}
