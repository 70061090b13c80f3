use axum::http::header::{CONTENT_RANGE, HeaderMap, HeaderValue};
use serde::Serialize;

use super::query_state::QueryState;

/// One page of an ordered collection, with the numbers needed to render a pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total_pages: u64,
    /// 1-based, always within `[1, total_pages]`
    pub page_number: u64,
    pub page_size: u64,
    /// Length of the collection before slicing
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Zero-based index of the first record on this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            records: self.records.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

/// `max(1, ceil(total_count / page_size))`. A zero page size counts as one.
#[must_use]
pub const fn total_pages(total_count: u64, page_size: u64) -> u64 {
    let page_size = if page_size == 0 { 1 } else { page_size };
    let pages = total_count.div_ceil(page_size);
    if pages == 0 { 1 } else { pages }
}

/// Clamp a requested page into `[1, total_pages(total_count, page_size)]`.
#[must_use]
pub const fn clamp_page_number(page_number: u64, total_count: u64, page_size: u64) -> u64 {
    let last = total_pages(total_count, page_size);
    if page_number < 1 {
        1
    } else if page_number > last {
        last
    } else {
        page_number
    }
}

/// Slice an already filtered and sorted collection into the requested page.
///
/// The page number is clamped, never rejected: asking for page 5 of three
/// returns page 3.
pub fn paginate<T>(records: Vec<T>, state: &QueryState) -> Page<T> {
    let total_count = records.len() as u64;
    let page_size = state.page_size().max(1);
    let total_pages = total_pages(total_count, page_size);
    let page_number = clamp_page_number(state.page_number(), total_count, page_size);
    if page_number != state.page_number() {
        tracing::debug!(
            requested = state.page_number(),
            page = page_number,
            total_pages,
            "Page number clamped"
        );
    }

    let start = usize::try_from((page_number - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    let take = usize::try_from(page_size).unwrap_or(usize::MAX);
    let records = records.into_iter().skip(start).take(take).collect();

    Page {
        records,
        total_pages,
        page_number,
        page_size,
        total_count,
    }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}

/// Build the `Content-Range` header for a page.
///
/// `<resource> <first>-<last>/<total>` with inclusive zero-based indices, or
/// `<resource> */<total>` when the page holds no records.
#[must_use]
pub fn calculate_content_range(offset: u64, shown: u64, total_count: u64, resource_name: &str) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);
    let safe_name = if safe_name.trim().is_empty() { "items" } else { safe_name.trim() };

    let content_range = if shown == 0 {
        format!("{safe_name} */{total_count}")
    } else {
        let last = offset.saturating_add(shown - 1);
        format!("{safe_name} {offset}-{last}/{total_count}")
    };

    let mut headers = HeaderMap::new();
    // Sanitized input always parses; fall back to a bare total if it somehow does not
    let value = HeaderValue::from_str(&content_range)
        .unwrap_or_else(|_| HeaderValue::from_static("items */0"));
    headers.insert(CONTENT_RANGE, value);
    headers
}

/// [`calculate_content_range`] for a page produced by [`paginate`].
#[must_use]
pub fn page_content_range<T>(page: &Page<T>, resource_name: &str) -> HeaderMap {
    calculate_content_range(page.offset(), page.len() as u64, page.total_count, resource_name)
}
