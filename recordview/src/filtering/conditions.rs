use chrono::NaiveDate;

use super::query_state::{QueryState, RangeBounds};
use super::search::SearchMatcher;
use crate::core::{FieldValue, ListRecord, ListSchema, RangeKind, parse_calendar_date};

/// Inclusive numeric or calendar-date bounds resolved against the schema.
#[derive(Debug, Clone, PartialEq)]
enum RangeCondition<'s> {
    Number {
        field: &'s str,
        min: Option<f64>,
        max: Option<f64>,
    },
    Date {
        field: &'s str,
        min: Option<NaiveDate>,
        max: Option<NaiveDate>,
    },
}

fn parse_number_bound(field: &str, bound: Option<&str>) -> Option<f64> {
    let bound = bound?;
    match bound.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            tracing::warn!(field, bound, "Ignoring unparseable numeric range bound");
            None
        }
    }
}

fn parse_date_bound(field: &str, bound: Option<&str>) -> Option<NaiveDate> {
    let bound = bound?;
    let date = parse_calendar_date(bound);
    if date.is_none() {
        tracing::warn!(field, bound, "Ignoring unparseable date range bound");
    }
    date
}

fn within<T: PartialOrd>(value: &T, min: Option<&T>, max: Option<&T>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

impl<'s> RangeCondition<'s> {
    fn resolve(field: &'s str, bounds: &RangeBounds, schema: &ListSchema) -> Option<Self> {
        let Some(kind) = schema.range_kind(field) else {
            tracing::debug!(field, resource = %schema.resource, "Range filter ignored: field is not a range field");
            return None;
        };
        let condition = match kind {
            RangeKind::Number => Self::Number {
                field,
                min: parse_number_bound(field, bounds.min.as_deref()),
                max: parse_number_bound(field, bounds.max.as_deref()),
            },
            RangeKind::Date => Self::Date {
                field,
                min: parse_date_bound(field, bounds.min.as_deref()),
                max: parse_date_bound(field, bounds.max.as_deref()),
            },
        };
        // Both bounds unparseable: no constraint on either side
        (!condition.is_unbounded()).then_some(condition)
    }

    fn is_unbounded(&self) -> bool {
        match self {
            Self::Number { min, max, .. } => min.is_none() && max.is_none(),
            Self::Date { min, max, .. } => min.is_none() && max.is_none(),
        }
    }

    /// A record with a missing or unreadable value never passes.
    fn matches<R: ListRecord + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Number { field, min, max } => record
                .field(field)
                .and_then(|value| value.as_number())
                .is_some_and(|n| within(&n, min.as_ref(), max.as_ref())),
            Self::Date { field, min, max } => record
                .field(field)
                .and_then(|value| value.as_date())
                .is_some_and(|d| within(&d, min.as_ref(), max.as_ref())),
        }
    }
}

/// Every active filter dimension of a state, resolved once per recomputation.
///
/// Dimensions combine with AND; a dimension that is not set matches everything.
#[derive(Debug, Clone)]
pub struct FilterConditions<'s> {
    status: Option<(&'s str, &'s str)>,
    search: Option<SearchMatcher<'s>>,
    ranges: Vec<RangeCondition<'s>>,
}

impl<'s> FilterConditions<'s> {
    #[must_use]
    pub fn new(state: &'s QueryState, schema: &'s ListSchema) -> Self {
        let status = match (state.status(), schema.status_field.as_deref()) {
            (Some(value), Some(field)) => Some((field, value)),
            (Some(value), None) => {
                tracing::debug!(value, resource = %schema.resource, "Status filter ignored: schema has no status field");
                None
            }
            (None, _) => None,
        };
        let search = state
            .search()
            .and_then(|query| SearchMatcher::new(query, &schema.search_fields));
        let ranges = state
            .ranges()
            .iter()
            .filter_map(|(field, bounds)| RangeCondition::resolve(field, bounds, schema))
            .collect();

        Self {
            status,
            search,
            ranges,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.search.is_none() && self.ranges.is_empty()
    }

    pub fn matches<R: ListRecord + ?Sized>(&self, record: &R) -> bool {
        if let Some((field, expected)) = self.status
            && !status_matches(record.field(field).as_ref(), expected)
        {
            return false;
        }
        if let Some(search) = &self.search
            && !search.matches(record)
        {
            return false;
        }
        self.ranges.iter().all(|range| range.matches(record))
    }
}

/// Exact, case-sensitive equality on the text form of the value.
fn status_matches(value: Option<&FieldValue<'_>>, expected: &str) -> bool {
    value.is_some_and(|value| value.to_text() == expected)
}

/// Keep the records matching every active filter dimension of `state`,
/// preserving their order. The result is never longer than the input.
pub fn apply_filters<'r, R, I>(records: I, state: &QueryState, schema: &ListSchema) -> Vec<&'r R>
where
    R: ListRecord + 'r,
    I: IntoIterator<Item = &'r R>,
{
    let conditions = FilterConditions::new(state, schema);
    if conditions.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| conditions.matches(*record))
        .collect()
}
