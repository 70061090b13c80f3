use crate::core::{ListRecord, ListResource, ListSchema};
use crate::filtering::{
    Page, QueryParams, QueryState, apply_filters, apply_sorting, clamp_page_number, paginate,
    total_pages,
};

/// Where the serialized state goes after every change.
///
/// The controller never touches a browser or router directly; the view layer
/// injects whatever owns the real URL.
pub trait UrlHistory {
    /// Replace the current URL query with `params`.
    fn replace_query(&mut self, params: &QueryParams);
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl UrlHistory for NoHistory {
    fn replace_query(&mut self, _params: &QueryParams) {}
}

/// Keeps every pushed query string, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedHistory {
    entries: Vec<String>,
}

impl RecordedHistory {
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

impl UrlHistory for RecordedHistory {
    fn replace_query(&mut self, params: &QueryParams) {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        self.entries.push(query);
    }
}

impl<F> UrlHistory for F
where
    F: FnMut(&QueryParams),
{
    fn replace_query(&mut self, params: &QueryParams) {
        (self)(params);
    }
}

/// Owner of one mounted list view.
///
/// Holds the query state, the entity's vocabulary and the unfiltered records.
/// The visible page is recomputed (filter, sort, paginate) on every read and
/// is never cached. State changes only through the action methods, each of
/// which clamps the page number against the new result and pushes the
/// serialized state to the injected [`UrlHistory`].
#[derive(Debug, Clone)]
pub struct ListViewController<R, H = NoHistory> {
    state: QueryState,
    schema: ListSchema,
    records: Vec<R>,
    history: H,
}

impl<R: ListRecord> ListViewController<R> {
    /// Mount a list view from the current URL parameters, without history.
    pub fn new(schema: ListSchema, records: Vec<R>, params: &QueryParams) -> Self {
        Self::with_history(schema, records, params, NoHistory)
    }
}

impl<R: ListResource> ListViewController<R> {
    /// Mount a list view for a record type that carries its own schema.
    pub fn from_resource(records: Vec<R>, params: &QueryParams) -> Self {
        Self::new(R::list_schema(), records, params)
    }
}

impl<R: ListRecord, H: UrlHistory> ListViewController<R, H> {
    /// Mount a list view from the current URL parameters.
    ///
    /// A page number beyond the result is clamped on mount, and only then is
    /// the corrected state written back to `history`.
    pub fn with_history(schema: ListSchema, records: Vec<R>, params: &QueryParams, history: H) -> Self {
        let mut controller = Self {
            state: QueryState::parse(params),
            schema,
            records,
            history,
        };
        if controller.clamp_page() {
            controller.push_history();
        }
        tracing::debug!(
            resource = %controller.schema.resource,
            records = controller.records.len(),
            query = %controller.state,
            "List view mounted"
        );
        controller
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    #[must_use]
    pub const fn schema(&self) -> &ListSchema {
        &self.schema
    }

    /// The unfiltered snapshot.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub const fn history(&self) -> &H {
        &self.history
    }

    /// Filter, sort and paginate the snapshot for the current state.
    #[must_use]
    pub fn visible_records(&self) -> Page<&R> {
        let filtered = apply_filters(&self.records, &self.state, &self.schema);
        let sorted = apply_sorting(filtered, &self.state, &self.schema);
        paginate(sorted, &self.state)
    }

    /// Number of records matching the current filters, before pagination.
    #[must_use]
    pub fn filtered_count(&self) -> u64 {
        count_matching(&self.records, &self.state, &self.schema)
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        total_pages(self.filtered_count(), self.state.page_size())
    }

    #[must_use]
    pub fn query_params(&self) -> QueryParams {
        self.state.serialize()
    }

    #[must_use]
    pub fn query_string(&self) -> String {
        self.state.to_query_string()
    }

    /// Header click: same column flips the order, a new column sorts ascending.
    /// The page number is kept.
    pub fn sort_by(&mut self, column: &str) {
        let next = self.state.with_sort(column);
        self.transition("sort_by", next);
    }

    /// Set one filter dimension by parameter key (`status`, `q`,
    /// `<field>_gte`, `<field>_lte`). Resets to the first page.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        let next = self.state.with_filter(key, value);
        self.transition("set_filter", next);
    }

    /// Set both bounds of a range filter. Resets to the first page.
    pub fn set_range(&mut self, field: &str, min: Option<&str>, max: Option<&str>) {
        let next = self.state.with_range(field, min, max);
        self.transition("set_range", next);
    }

    pub fn clear_filter(&mut self, key: &str) {
        let next = self.state.without_filter(key);
        self.transition("clear_filter", next);
    }

    pub fn clear_all(&mut self) {
        let next = self.state.without_filters();
        self.transition("clear_all", next);
    }

    /// Zero means the default size. Resets to the first page.
    pub fn set_page_size(&mut self, page_size: u64) {
        let next = self.state.with_page_size(page_size);
        self.transition("set_page_size", next);
    }

    /// Out-of-range pages clamp to the nearest valid page.
    pub fn set_page_number(&mut self, page_number: u64) {
        let next = self.state.with_page_number(page_number);
        self.transition("set_page_number", next);
    }

    /// Swap in a fresh snapshot from the record source. The page number is
    /// re-clamped, and the URL is updated only if that changed it.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        if self.clamp_page() {
            self.push_history();
        }
    }

    /// Resolve a column's navigation template for one record.
    #[must_use]
    pub fn navigation_path(&self, column_key: &str, record: &R) -> Option<String> {
        self.schema.find_column(column_key)?.navigation_path(record)
    }

    fn transition(&mut self, action: &'static str, next: QueryState) {
        let count = count_matching(&self.records, &next, &self.schema);
        let page = clamp_page_number(next.page_number(), count, next.page_size());
        self.state = if page == next.page_number() {
            next
        } else {
            next.with_page_number(page)
        };
        tracing::debug!(
            action,
            resource = %self.schema.resource,
            query = %self.state,
            "List view state changed"
        );
        self.push_history();
    }

    /// Returns whether the page number had to change.
    fn clamp_page(&mut self) -> bool {
        let count = self.filtered_count();
        let page = clamp_page_number(self.state.page_number(), count, self.state.page_size());
        if page == self.state.page_number() {
            return false;
        }
        tracing::debug!(
            requested = self.state.page_number(),
            page,
            resource = %self.schema.resource,
            "Clamped page number to the result"
        );
        self.state = self.state.with_page_number(page);
        true
    }

    fn push_history(&mut self) {
        self.history.replace_query(&self.state.serialize());
    }
}

fn count_matching<R: ListRecord>(records: &[R], state: &QueryState, schema: &ListSchema) -> u64 {
    apply_filters(records, state, schema).len() as u64
}
