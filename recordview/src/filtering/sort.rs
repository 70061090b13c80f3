use chrono::NaiveDate;
use std::cmp::Ordering;

use super::query_state::{QueryState, SortOrder};
use crate::core::{FieldValue, ListRecord, ListSchema, RangeKind};

/// How every value of one sort column is read before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Date,
    Text,
}

impl From<RangeKind> for ColumnKind {
    fn from(kind: RangeKind) -> Self {
        match kind {
            RangeKind::Number => Self::Number,
            RangeKind::Date => Self::Date,
        }
    }
}

impl ColumnKind {
    /// Kind of a column the schema gives no range kind for.
    ///
    /// Number when every present value reads as a number, else Date when
    /// every present value reads as a date, else Text. Date and number
    /// strings from JSON records therefore sort like typed values.
    #[must_use]
    pub fn infer<'v, 'f: 'v>(values: impl IntoIterator<Item = &'v FieldValue<'f>> + Clone) -> Self {
        if values.clone().into_iter().all(|v| v.as_number().is_some()) {
            Self::Number
        } else if values.into_iter().all(|v| v.as_date().is_some()) {
            Self::Date
        } else {
            Self::Text
        }
    }

    /// Column kind used to sort `column`: the schema's range kind when one
    /// is declared, inferred from the values otherwise.
    #[must_use]
    pub fn for_column<'v, 'f: 'v>(
        schema: &ListSchema,
        column: &str,
        values: impl IntoIterator<Item = &'v FieldValue<'f>> + Clone,
    ) -> Self {
        schema
            .range_kind(column)
            .map_or_else(|| Self::infer(values), Self::from)
    }

    /// Sort key of one value, or `None` when it cannot be read as this kind.
    #[must_use]
    pub fn key(self, value: &FieldValue<'_>) -> Option<SortKey> {
        match self {
            Self::Number => value.as_number().map(SortKey::Number),
            Self::Date => value.as_date().map(SortKey::Date),
            Self::Text => Some(SortKey::Text(value.to_text().to_lowercase())),
        }
    }
}

/// A value read under its column's [`ColumnKind`]. Keys of one column are
/// always the same variant.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total ascending order between two keys.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two sort keys. Present keys follow the sort order; missing keys
/// go last in both directions.
#[must_use]
pub fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.compare(b);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The column the state asks to sort by, if the schema allows sorting on it.
#[must_use]
pub fn resolve_sort_column<'a>(state: &'a QueryState, schema: &ListSchema) -> Option<&'a str> {
    let column = state.sort_column()?;
    if schema.is_sortable(column) {
        Some(column)
    } else {
        tracing::debug!(column, resource = %schema.resource, "Sort ignored: column is not in the sort vocabulary");
        None
    }
}

/// Stable sort by the state's sort column.
///
/// Without a sort column, or with one the schema does not list as sortable,
/// the input (insertion) order is returned unchanged. Records that compare
/// equal keep their relative input order in both directions. Values that
/// cannot be read as the column's kind sort with the missing ones.
pub fn apply_sorting<'r, R: ListRecord + ?Sized>(
    records: Vec<&'r R>,
    state: &QueryState,
    schema: &ListSchema,
) -> Vec<&'r R> {
    let Some(column) = resolve_sort_column(state, schema) else {
        return records;
    };
    let order = state.sort_order();

    let values: Vec<Option<FieldValue<'r>>> = records.iter().map(|&r| r.field(column)).collect();
    let kind = ColumnKind::for_column(schema, column, values.iter().flatten());
    tracing::trace!(column, ?kind, "Sorting records");

    let mut keyed: Vec<(Option<SortKey>, &'r R)> = values
        .iter()
        .map(|value| value.as_ref().and_then(|v| kind.key(v)))
        .zip(records)
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), order));
    keyed.into_iter().map(|(_, record)| record).collect()
}
