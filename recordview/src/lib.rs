//! Query-state-driven list engine.
//!
//! Turns a filter/sort/pagination request, kept in the URL, into a
//! deterministic page of a record collection. See [`filtering`] for the
//! engine, [`ListViewController`] for the stateful owner of one list view and
//! [`routes`] for serving a collection over HTTP.

extern crate self as recordview;

pub mod controller;
pub mod core;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod remote;
pub mod routes;
pub mod validation;

#[cfg(feature = "derive")]
pub use recordview_derive::ListRecord; // Export the proc macro

pub use controller::{ListViewController, NoHistory, RecordedHistory, UrlHistory};
pub use crate::core::{
    ColumnSpec, FieldValue, FilterOption, ID_PLACEHOLDER, ListRecord, ListResource, ListSchema,
    RangeField, RangeKind, SortOption, ToFieldValue, parse_calendar_date,
};
pub use errors::{ApiError, SchemaError, SourceError};
pub use filtering::{
    Page, QueryParams, QueryState, SortOrder, apply_filters, apply_sorting, paginate,
};
pub use models::{ListResponse, PageMeta};
pub use remote::{
    Completion, Debouncer, Generation, InMemorySource, QueryTracker, RemoteRecordSource,
    fetch_with_timeout,
};
pub use routes::{list_router, resource_router, source_router};
pub use validation::{ValidationError, ValidationErrors};
pub use serde_with;
