//! # Remote Record Sources
//!
//! When records come from a remote query instead of an in-memory snapshot,
//! every state change issues a new query and responses can arrive out of
//! order. Three pieces keep the view consistent:
//!
//! - [`RemoteRecordSource`] answers a [`QueryState`] with one page
//! - [`QueryTracker`] stamps each query with a [`Generation`], drops responses
//!   older than the latest query, and keeps the last good page visible while a
//!   query is pending
//! - [`Debouncer`] waits for typing to pause before a search is applied, and
//!   only the latest value ever comes through
//!
//! ```rust
//! use recordview::{Completion, InMemorySource, ListSchema, QueryState, QueryTracker, RemoteRecordSource};
//! use serde_json::json;
//!
//! # tokio_test_block_on(async {
//! let source = InMemorySource::new(
//!     ListSchema::new("customers").status_field("status"),
//!     vec![json!({"status": "Active"}), json!({"status": "Inactive"})],
//! );
//! let mut tracker = QueryTracker::new();
//!
//! let stale = tracker.begin();
//! let latest = tracker.begin();
//! let everything = source.fetch(&QueryState::default()).await;
//! let active = source.fetch(&QueryState::default().with_filter("status", "Active")).await;
//!
//! assert_eq!(tracker.complete(latest, active), Completion::Applied);
//! assert_eq!(tracker.complete(stale, everything), Completion::Stale);
//! assert_eq!(tracker.current().unwrap().records.len(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::core::{ListRecord, ListResource, ListSchema};
use crate::errors::SourceError;
use crate::filtering::{Page, QueryState, apply_filters, apply_sorting, paginate};

/// Delay applied to free-text search input before it becomes a query.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A record source that answers queries asynchronously.
///
/// Filtering, sorting and pagination happen on the source's side; the caller
/// only ever sees the requested page.
#[async_trait]
pub trait RemoteRecordSource: Send + Sync {
    type Record: Send;

    /// Name used in `Content-Range` headers and log lines.
    fn resource_name(&self) -> &str;

    /// # Errors
    ///
    /// Returns [`SourceError`] when the source cannot answer.
    async fn fetch(&self, state: &QueryState) -> Result<Page<Self::Record>, SourceError>;
}

/// Serves a shared snapshot through the synchronous engine.
#[derive(Debug)]
pub struct InMemorySource<R> {
    schema: ListSchema,
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for InMemorySource<R> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> InMemorySource<R> {
    #[must_use]
    pub fn new(schema: ListSchema, records: Vec<R>) -> Self {
        Self {
            schema,
            records: Arc::new(RwLock::new(records)),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &ListSchema {
        &self.schema
    }

    /// Swap the snapshot; queries already running keep the old one.
    pub async fn replace(&self, records: Vec<R>) {
        *self.records.write().await = records;
    }
}

impl<R: ListResource> InMemorySource<R> {
    #[must_use]
    pub fn for_resource(records: Vec<R>) -> Self {
        Self::new(R::list_schema(), records)
    }
}

#[async_trait]
impl<R> RemoteRecordSource for InMemorySource<R>
where
    R: ListRecord + Clone + Send + Sync,
{
    type Record = R;

    fn resource_name(&self) -> &str {
        &self.schema.resource
    }

    async fn fetch(&self, state: &QueryState) -> Result<Page<R>, SourceError> {
        let records = self.records.read().await;
        let filtered = apply_filters(records.iter(), state, &self.schema);
        let sorted = apply_sorting(filtered, state, &self.schema);
        Ok(paginate(sorted, state).map(Clone::clone))
    }
}

/// Fetch with an upper bound on how long the source may take.
///
/// # Errors
///
/// Returns [`SourceError::Timeout`] when `limit` elapses first, or the
/// source's own error.
pub async fn fetch_with_timeout<S>(
    source: &S,
    state: &QueryState,
    limit: Duration,
) -> Result<Page<S::Record>, SourceError>
where
    S: RemoteRecordSource + ?Sized,
{
    if let Ok(result) = tokio::time::timeout(limit, source.fetch(state)).await {
        result
    } else {
        tracing::warn!(
            resource = source.resource_name(),
            limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            "Record source timed out"
        );
        Err(SourceError::Timeout(limit))
    }
}

/// Monotonic token identifying one issued query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// What happened to a completed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Latest query succeeded; its page is now current
    Applied,
    /// A newer query was issued since; the response was discarded
    Stale,
    /// Latest query failed; the previous page stays current
    Failed(SourceError),
}

/// Orders the responses of concurrently issued queries.
#[derive(Debug, Clone)]
pub struct QueryTracker<T> {
    issued: Generation,
    pending: bool,
    current: Option<Page<T>>,
}

impl<T> Default for QueryTracker<T> {
    fn default() -> Self {
        Self {
            issued: Generation::default(),
            pending: false,
            current: None,
        }
    }
}

impl<T> QueryTracker<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new query. Every earlier generation becomes stale.
    pub fn begin(&mut self) -> Generation {
        self.issued = Generation(self.issued.0 + 1);
        self.pending = true;
        self.issued
    }

    /// Record a response. Only the latest generation can change what is shown.
    pub fn complete(&mut self, generation: Generation, result: Result<Page<T>, SourceError>) -> Completion {
        if generation != self.issued {
            tracing::debug!(
                generation = generation.value(),
                latest = self.issued.value(),
                "Discarding stale query response"
            );
            return Completion::Stale;
        }
        self.pending = false;
        match result {
            Ok(page) => {
                self.current = Some(page);
                Completion::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, generation = generation.value(), "Query failed, keeping last page");
                Completion::Failed(err)
            }
        }
    }

    /// The last good page. Stays in place while a newer query is pending.
    #[must_use]
    pub const fn current(&self) -> Option<&Page<T>> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub const fn latest(&self) -> Generation {
        self.issued
    }
}

/// Trailing-edge debounce for search input.
///
/// Each call to [`Debouncer::settle`] waits out the delay and yields its value
/// only if no newer call started in the meantime.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// `Some(value)` once input has been quiet for the delay, `None` if a
    /// newer value superseded this one.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.latest.load(Ordering::SeqCst) == ticket).then_some(value)
    }
}
