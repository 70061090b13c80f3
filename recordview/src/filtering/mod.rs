//! # Filtering, Sorting & Pagination
//!
//! The synchronous list engine. A [`QueryState`] is parsed from URL
//! parameters, then every read runs the same pipeline over the unfiltered
//! records:
//!
//! 1. [`apply_filters`]: status equality, free-text search and inclusive
//!    range bounds, combined with AND
//! 2. [`apply_sorting`]: stable, missing values last
//! 3. [`paginate`]: slice with the page number clamped into range
//!
//! ## Query Parameters
//!
//! ```text
//! GET /customers?status=Active&sort_column=name&sort_order=A&per_page=5&page=2
//! GET /invoices?q=acme&amount_gte=100&issued_on_lte=2024-12-31
//! ```
//!
//! Malformed values never fail: `per_page`/`page` fall back to their defaults,
//! an unknown `sort_order` reads as `A`, and an unknown sort column keeps the
//! insertion order.
//!
//! ```rust
//! use recordview::{ListSchema, QueryState, apply_filters, apply_sorting, paginate};
//! use serde_json::json;
//!
//! let schema = ListSchema::new("customers").status_field("status");
//! let records = vec![
//!     json!({"name": "Acme", "status": "Active"}),
//!     json!({"name": "Globex", "status": "Inactive"}),
//! ];
//! let state = QueryState::from_query_string("status=Active&page=9");
//!
//! let filtered = apply_filters(&records, &state, &schema);
//! let page = paginate(apply_sorting(filtered, &state, &schema), &state);
//! assert_eq!(page.records.len(), 1);
//! assert_eq!(page.page_number, 1);
//! ```

pub mod conditions;
pub mod pagination;
pub mod query_state;
pub mod search;
pub mod sort;

// Re-export commonly used items
pub use conditions::{FilterConditions, apply_filters};
pub use pagination::{
    Page, calculate_content_range, clamp_page_number, page_content_range, paginate, total_pages,
};
pub use query_state::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, FilterKey, PAGE_PARAM, PER_PAGE_PARAM, QueryParams,
    QueryState, RangeBounds, SEARCH_PARAM, SORT_COLUMN_PARAM, SORT_ORDER_PARAM, STATUS_PARAM,
    SortOrder,
};
pub use search::SearchMatcher;
pub use sort::{ColumnKind, SortKey, apply_sorting, compare_keys, resolve_sort_column};
