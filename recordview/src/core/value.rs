use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::borrow::Cow;
use std::cmp::Ordering;
use uuid::Uuid;

/// A single field read from a record.
///
/// Records are schema-agnostic: the engine only ever asks for a field by
/// name and gets back one of these three shapes (or nothing, when the field
/// is missing).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text or an enum-like label (`"Active"`, `"INV-0012"`).
    Text(Cow<'a, str>),
    /// Any numeric value, including money amounts.
    Number(f64),
    /// A calendar date without time-of-day.
    Date(NaiveDate),
}

impl<'a> FieldValue<'a> {
    #[must_use]
    pub const fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// Numeric view of the value. Text is accepted when it parses as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            Self::Date(_) => None,
        }
    }

    /// Calendar-date view of the value. Text is accepted when it parses as a date.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => parse_calendar_date(s),
            Self::Number(_) => None,
        }
    }

    /// Text view used for exact matching and free-text search.
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_ref()),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total ascending order between two present values.
    ///
    /// Text compares case-insensitively, numbers numerically and dates
    /// chronologically. Values of different kinds order Number < Date < Text.
    #[must_use]
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (Self::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (Self::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (Self::Text(a), FieldValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// Parse a date-string down to its calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps; the time-of-day part is dropped.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|timestamp| timestamp.date())
}

/// Conversion from a struct field into a [`FieldValue`].
///
/// `#[derive(ListRecord)]` calls this for every exposed field, so any field
/// type used in a list record must implement it. `None` means "missing".
pub trait ToFieldValue {
    fn to_field_value(&self) -> Option<FieldValue<'_>>;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(self))
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(self))
    }
}

impl ToFieldValue for &str {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(self))
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        self.as_ref().and_then(ToFieldValue::to_field_value)
    }
}

macro_rules! numeric_field_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ToFieldValue for $ty {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless, clippy::unnecessary_cast)]
                fn to_field_value(&self) -> Option<FieldValue<'_>> {
                    Some(FieldValue::Number(*self as f64))
                }
            }
        )+
    };
}

numeric_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl ToFieldValue for bool {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::text(if *self { "true" } else { "false" }))
    }
}

impl ToFieldValue for Decimal {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        self.to_f64().map(FieldValue::Number)
    }
}

impl ToFieldValue for NaiveDate {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Date(*self))
    }
}

impl ToFieldValue for NaiveDateTime {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Date(self.date()))
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Date(self.date_naive()))
    }
}

impl ToFieldValue for Uuid {
    fn to_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Text(Cow::Owned(self.to_string())))
    }
}
