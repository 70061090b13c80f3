use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::validation::validators::is_valid_field_name;

/// Flat string-keyed parameter map, the in-memory form of a URL query string.
pub type QueryParams = BTreeMap<String, String>;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

pub const SORT_COLUMN_PARAM: &str = "sort_column";
pub const SORT_ORDER_PARAM: &str = "sort_order";
pub const STATUS_PARAM: &str = "status";
pub const PER_PAGE_PARAM: &str = "per_page";
pub const PAGE_PARAM: &str = "page";
pub const SEARCH_PARAM: &str = "q";

const RANGE_MIN_SUFFIX: &str = "_gte";
const RANGE_MAX_SUFFIX: &str = "_lte";

// Basic safety limits
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// Sort direction as written in the URL: `A` ascending, `B` descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "A")]
    Ascending,
    #[serde(rename = "B")]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "A",
            Self::Descending => "B",
        }
    }

    /// Only the exact value `B` reads as descending; anything else, padded
    /// values included, reads as ascending.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "B" => Self::Descending,
            "A" => Self::Ascending,
            other => {
                tracing::warn!(value = %other, "Unknown sort_order, using ascending");
                Self::Ascending
            }
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Inclusive bounds of one range filter, kept as raw parameter text.
///
/// Bounds are interpreted (as numbers or calendar dates) only when the filter
/// runs against a schema that declares the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl RangeBounds {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Which filter dimension a parameter key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey<'a> {
    Status,
    Search,
    RangeMin(&'a str),
    RangeMax(&'a str),
    /// Not a filter key; pagination/sort keys and unknown parameters land here
    Unsupported(&'a str),
}

impl<'a> FilterKey<'a> {
    #[must_use]
    pub fn parse(key: &'a str) -> Self {
        if key == STATUS_PARAM {
            return Self::Status;
        }
        if key == SEARCH_PARAM {
            return Self::Search;
        }
        if let Some(field) = key.strip_suffix(RANGE_MIN_SUFFIX)
            && is_valid_field_name(field)
        {
            return Self::RangeMin(field);
        }
        if let Some(field) = key.strip_suffix(RANGE_MAX_SUFFIX)
            && is_valid_field_name(field)
        {
            return Self::RangeMax(field);
        }
        Self::Unsupported(key)
    }
}

/// Trim a filter value; empty or oversized values mean "no filter".
fn normalize_value(value: &str) -> Option<String> {
    if value.len() > MAX_FIELD_VALUE_LENGTH {
        tracing::warn!(length = value.len(), "Ignoring oversized query parameter value");
        return None;
    }
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_positive(param: &str, value: &str, default: u64) -> u64 {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!(param, value, default, "Malformed pagination parameter, using default");
            default
        }
    }
}

/// Canonical filter/sort/pagination request of one list view.
///
/// Fields are private: a state is built by [`QueryState::parse`] and changed
/// only through the `with_*`/`without_*` transforms, each of which returns a
/// new state. Any transform that changes the result set (a filter or the page
/// size) resets the page number to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    sort_column: Option<String>,
    sort_order: SortOrder,
    status: Option<String>,
    search: Option<String>,
    ranges: BTreeMap<String, RangeBounds>,
    page_size: u64,
    page_number: u64,
    passthrough: QueryParams,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            sort_column: None,
            sort_order: SortOrder::Ascending,
            status: None,
            search: None,
            ranges: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page_number: DEFAULT_PAGE_NUMBER,
            passthrough: QueryParams::new(),
        }
    }
}

impl QueryState {
    /// Build a state from URL parameters.
    ///
    /// Never fails: malformed `per_page`/`page` fall back to their defaults,
    /// an unknown `sort_order` reads as `A`, and unknown parameters are kept
    /// verbatim so they survive [`QueryState::serialize`]. When a key repeats,
    /// the last value wins.
    pub fn parse<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                SORT_COLUMN_PARAM => state.sort_column = normalize_value(value),
                SORT_ORDER_PARAM => state.sort_order = SortOrder::from_param(value),
                PER_PAGE_PARAM => state.page_size = parse_positive(key, value, DEFAULT_PAGE_SIZE),
                PAGE_PARAM => state.page_number = parse_positive(key, value, DEFAULT_PAGE_NUMBER),
                _ => match FilterKey::parse(key) {
                    FilterKey::Unsupported(_) => {
                        state.passthrough.insert(key.to_string(), value.to_string());
                    }
                    filter_key => state.set_filter(filter_key, value),
                },
            }
        }
        state
    }

    /// Parse a URL-encoded query string, with or without the leading `?`.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::parse(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Inverse of [`QueryState::parse`]: `parse(serialize(s)) == s`.
    ///
    /// `sort_order`, `per_page` and `page` are always written; the optional
    /// keys only when set.
    #[must_use]
    pub fn serialize(&self) -> QueryParams {
        let mut params = self.passthrough.clone();
        if let Some(column) = &self.sort_column {
            params.insert(SORT_COLUMN_PARAM.to_string(), column.clone());
        }
        params.insert(SORT_ORDER_PARAM.to_string(), self.sort_order.as_param().to_string());
        if let Some(status) = &self.status {
            params.insert(STATUS_PARAM.to_string(), status.clone());
        }
        if let Some(search) = &self.search {
            params.insert(SEARCH_PARAM.to_string(), search.clone());
        }
        for (field, bounds) in &self.ranges {
            if let Some(min) = &bounds.min {
                params.insert(format!("{field}{RANGE_MIN_SUFFIX}"), min.clone());
            }
            if let Some(max) = &bounds.max {
                params.insert(format!("{field}{RANGE_MAX_SUFFIX}"), max.clone());
            }
        }
        params.insert(PER_PAGE_PARAM.to_string(), self.page_size.to_string());
        params.insert(PAGE_PARAM.to_string(), self.page_number.to_string());
        params
    }

    /// URL-encoded form of [`QueryState::serialize`], without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.serialize())
            .finish()
    }

    #[must_use]
    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub const fn ranges(&self) -> &BTreeMap<String, RangeBounds> {
        &self.ranges
    }

    #[must_use]
    pub fn range(&self, field: &str) -> Option<&RangeBounds> {
        self.ranges.get(field)
    }

    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.page_number
    }

    /// Parameters the engine does not understand, kept for round-trip fidelity.
    #[must_use]
    pub const fn passthrough(&self) -> &QueryParams {
        &self.passthrough
    }

    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.status.is_some() || self.search.is_some() || !self.ranges.is_empty()
    }

    /// Header-click transform: the same column flips the order, a new column
    /// starts ascending. An empty column clears the sort.
    #[must_use]
    pub fn with_sort(&self, column: &str) -> Self {
        let mut next = self.clone();
        match normalize_value(column) {
            Some(column) if self.sort_column.as_deref() == Some(column.as_str()) => {
                next.sort_order = self.sort_order.flipped();
            }
            Some(column) => {
                next.sort_column = Some(column);
                next.sort_order = SortOrder::Ascending;
            }
            None => {
                next.sort_column = None;
                next.sort_order = SortOrder::Ascending;
            }
        }
        next
    }

    /// Set one filter dimension by its parameter key (`status`, `q`,
    /// `<field>_gte`, `<field>_lte`). An empty value clears it. Resets the page.
    ///
    /// Keys that are not filter keys leave the state unchanged.
    #[must_use]
    pub fn with_filter(&self, key: &str, value: &str) -> Self {
        match FilterKey::parse(key) {
            FilterKey::Unsupported(key) => {
                tracing::warn!(key, "Ignoring unsupported filter key");
                self.clone()
            }
            filter_key => {
                let mut next = self.clone();
                next.set_filter(filter_key, value);
                next.page_number = DEFAULT_PAGE_NUMBER;
                next
            }
        }
    }

    /// Set both bounds of a range filter at once. Resets the page.
    #[must_use]
    pub fn with_range(&self, field: &str, min: Option<&str>, max: Option<&str>) -> Self {
        if !is_valid_field_name(field) {
            tracing::warn!(field, "Ignoring range filter on invalid field name");
            return self.clone();
        }
        let mut next = self.clone();
        next.set_filter(FilterKey::RangeMin(field), min.unwrap_or_default());
        next.set_filter(FilterKey::RangeMax(field), max.unwrap_or_default());
        next.page_number = DEFAULT_PAGE_NUMBER;
        next
    }

    #[must_use]
    pub fn without_filter(&self, key: &str) -> Self {
        self.with_filter(key, "")
    }

    /// Clear every filter dimension. Sort, page size and passthrough
    /// parameters are kept.
    #[must_use]
    pub fn without_filters(&self) -> Self {
        Self {
            status: None,
            search: None,
            ranges: BTreeMap::new(),
            page_number: DEFAULT_PAGE_NUMBER,
            ..self.clone()
        }
    }

    /// Zero normalizes to the default page size. Resets the page.
    #[must_use]
    pub fn with_page_size(&self, page_size: u64) -> Self {
        Self {
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            page_number: DEFAULT_PAGE_NUMBER,
            ..self.clone()
        }
    }

    /// Zero normalizes to the first page. The upper bound is clamped by the
    /// controller once the result size is known.
    #[must_use]
    pub fn with_page_number(&self, page_number: u64) -> Self {
        Self {
            page_number: page_number.max(DEFAULT_PAGE_NUMBER),
            ..self.clone()
        }
    }

    fn set_filter(&mut self, key: FilterKey<'_>, value: &str) {
        let value = normalize_value(value);
        match key {
            FilterKey::Status => self.status = value,
            FilterKey::Search => self.search = value,
            FilterKey::RangeMin(field) | FilterKey::RangeMax(field) => {
                let bounds = self.ranges.entry(field.to_string()).or_default();
                if matches!(key, FilterKey::RangeMin(_)) {
                    bounds.min = value;
                } else {
                    bounds.max = value;
                }
                if bounds.is_empty() {
                    self.ranges.remove(field);
                }
            }
            FilterKey::Unsupported(_) => {}
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_empty_params_gives_defaults() {
        let state = QueryState::parse(QueryParams::new());
        assert_eq!(state, QueryState::default());
        assert_eq!(state.sort_column(), None);
        assert_eq!(state.sort_order(), SortOrder::Ascending);
        assert_eq!(state.status(), None);
        assert_eq!(state.page_size(), 10);
        assert_eq!(state.page_number(), 1);
    }

    #[test]
    fn test_parse_reads_every_contract_param() {
        let state = QueryState::parse(params(&[
            ("sort_column", "name"),
            ("sort_order", "B"),
            ("status", "Active"),
            ("per_page", "25"),
            ("page", "3"),
        ]));
        assert_eq!(state.sort_column(), Some("name"));
        assert_eq!(state.sort_order(), SortOrder::Descending);
        assert_eq!(state.status(), Some("Active"));
        assert_eq!(state.page_size(), 25);
        assert_eq!(state.page_number(), 3);
    }

    #[test]
    fn test_malformed_numbers_fall_back_to_defaults() {
        for bad in ["abc", "", "0", "-4", "2.5", "99999999999999999999999"] {
            let state = QueryState::parse(params(&[("per_page", bad), ("page", bad)]));
            assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE, "per_page={bad}");
            assert_eq!(state.page_number(), DEFAULT_PAGE_NUMBER, "page={bad}");
        }
    }

    #[test]
    fn test_unknown_sort_order_reads_as_ascending() {
        for value in ["asc", "desc", "b", "DESC", "", " B", "B ", "%20B"] {
            let state = QueryState::parse(params(&[("sort_order", value)]));
            assert_eq!(state.sort_order(), SortOrder::Ascending, "sort_order={value}");
        }
    }

    #[test]
    fn test_sort_order_matches_the_raw_value() {
        assert_eq!(SortOrder::from_param("B"), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(" B"), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param("B\t"), SortOrder::Ascending);

        let padded = QueryState::from_query_string("sort_column=name&sort_order=+B");
        assert_eq!(padded.sort_order(), SortOrder::Ascending);
        assert_eq!(padded.serialize().get("sort_order").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_unknown_params_pass_through_untouched() {
        let state = QueryState::parse(params(&[("tab", "overview"), ("status", "Paid")]));
        assert_eq!(state.passthrough().get("tab").map(String::as_str), Some("overview"));

        let serialized = state.serialize();
        assert_eq!(serialized.get("tab").map(String::as_str), Some("overview"));
        assert_eq!(QueryState::parse(serialized), state);
    }

    #[test]
    fn test_round_trip() {
        let states = [
            QueryState::default(),
            QueryState::default().with_sort("name"),
            QueryState::default().with_sort("name").with_sort("name"),
            QueryState::default()
                .with_filter("status", "Overdue")
                .with_filter("q", "acme corp")
                .with_range("amount", Some("100"), Some("2500.50"))
                .with_filter("issued_on_gte", "2024-01-01")
                .with_page_size(25)
                .with_page_number(4),
            QueryState::parse(params(&[("view", "compact"), ("page", "2")])),
        ];

        for state in states {
            assert_eq!(QueryState::parse(state.serialize()), state);
            assert_eq!(QueryState::from_query_string(&state.to_query_string()), state);
        }
    }

    #[test]
    fn test_query_string_encoding() {
        let state = QueryState::default().with_filter("q", "smith & sons");
        let query = state.to_query_string();
        assert!(query.contains("q=smith+%26+sons"), "{query}");
        assert_eq!(QueryState::from_query_string(&format!("?{query}")), state);
    }

    #[test]
    fn test_with_sort_toggles_same_column() {
        let start = QueryState::default();

        let once = start.with_sort("name");
        assert_eq!(once.sort_column(), Some("name"));
        assert_eq!(once.sort_order(), SortOrder::Ascending);

        let twice = once.with_sort("name");
        assert_eq!(twice.sort_order(), SortOrder::Descending);

        // Two clicks on the same header return to the state after zero clicks
        let sorted = QueryState::default().with_sort("name");
        assert_eq!(sorted.with_sort("name").with_sort("name"), sorted);
    }

    #[test]
    fn test_with_sort_new_column_resets_to_ascending() {
        let state = QueryState::default().with_sort("name").with_sort("name");
        assert_eq!(state.sort_order(), SortOrder::Descending);

        let other = state.with_sort("email");
        assert_eq!(other.sort_column(), Some("email"));
        assert_eq!(other.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn test_filter_and_page_size_reset_page_number() {
        let on_page_three = QueryState::default().with_page_number(3);
        assert_eq!(on_page_three.page_number(), 3);

        assert_eq!(on_page_three.with_filter("status", "Active").page_number(), 1);
        assert_eq!(on_page_three.with_filter("q", "acme").page_number(), 1);
        assert_eq!(on_page_three.with_range("amount", Some("1"), None).page_number(), 1);
        assert_eq!(on_page_three.with_page_size(50).page_number(), 1);
        assert_eq!(on_page_three.without_filters().page_number(), 1);
    }

    #[test]
    fn test_sort_keeps_page_number() {
        let state = QueryState::default().with_page_number(3).with_sort("name");
        assert_eq!(state.page_number(), 3);
    }

    #[test]
    fn test_empty_filter_value_clears_the_filter() {
        let state = QueryState::default().with_filter("status", "Active");
        assert_eq!(state.status(), Some("Active"));
        assert_eq!(state.with_filter("status", "   ").status(), None);
        assert_eq!(state.without_filter("status").status(), None);
    }

    #[test]
    fn test_unsupported_filter_key_is_ignored() {
        let state = QueryState::default().with_page_number(2);
        assert_eq!(state.with_filter("page", "7"), state);
        assert_eq!(state.with_filter("_gte", "7"), state);
    }

    #[test]
    fn test_range_bounds() {
        let state = QueryState::default()
            .with_filter("amount_gte", "100")
            .with_filter("amount_lte", "500");
        let bounds = state.range("amount").unwrap();
        assert_eq!(bounds.min.as_deref(), Some("100"));
        assert_eq!(bounds.max.as_deref(), Some("500"));

        let cleared = state.without_filter("amount_gte").without_filter("amount_lte");
        assert!(cleared.range("amount").is_none());
        assert!(!cleared.has_filters());
    }

    #[test]
    fn test_zero_page_size_and_number_normalize() {
        let state = QueryState::default().with_page_size(0).with_page_number(0);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(state.page_number(), DEFAULT_PAGE_NUMBER);
    }

    #[test]
    fn test_without_filters_keeps_sort_and_passthrough() {
        let state = QueryState::parse(params(&[("tab", "open"), ("per_page", "20")]))
            .with_sort("name")
            .with_filter("status", "Active")
            .with_filter("q", "acme");
        let cleared = state.without_filters();
        assert!(!cleared.has_filters());
        assert_eq!(cleared.sort_column(), Some("name"));
        assert_eq!(cleared.page_size(), 20);
        assert_eq!(cleared.passthrough().len(), 1);
    }

    #[test]
    fn test_oversized_values_are_ignored() {
        let huge = "x".repeat(MAX_FIELD_VALUE_LENGTH + 1);
        let state = QueryState::default().with_filter("q", &huge);
        assert_eq!(state.search(), None);
    }

    #[test]
    fn test_filter_key_parsing() {
        assert_eq!(FilterKey::parse("status"), FilterKey::Status);
        assert_eq!(FilterKey::parse("q"), FilterKey::Search);
        assert_eq!(FilterKey::parse("amount_gte"), FilterKey::RangeMin("amount"));
        assert_eq!(FilterKey::parse("due_on_lte"), FilterKey::RangeMax("due_on"));
        assert_eq!(FilterKey::parse("_lte"), FilterKey::Unsupported("_lte"));
        assert_eq!(FilterKey::parse("tab"), FilterKey::Unsupported("tab"));
    }
}
