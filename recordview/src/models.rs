use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::filtering::{Page, QueryState};

/// Pager metadata returned next to the items of one page.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Page actually served, after clamping
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    /// Matching records across all pages
    pub total_count: u64,
    /// Canonical query string for this page, ready to put in the URL
    pub query: String,
    pub sort_column: Option<String>,
    pub sort_order: String,
}

impl PageMeta {
    #[must_use]
    pub fn new<T>(page: &Page<T>, state: &QueryState) -> Self {
        let served = state.with_page_number(page.page_number);
        Self {
            page: page.page_number,
            per_page: page.page_size,
            total_pages: page.total_pages,
            total_count: page.total_count,
            query: served.to_query_string(),
            sort_column: state.sort_column().map(str::to_string),
            sort_order: state.sort_order().as_param().to_string(),
        }
    }
}

/// Body of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn from_page(page: Page<T>, state: &QueryState) -> Self {
        let meta = PageMeta::new(&page, state);
        Self {
            items: page.records,
            meta,
        }
    }
}
