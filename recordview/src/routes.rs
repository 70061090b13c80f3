use axum::{
    Json, Router,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::{ListRecord, ListResource, ListSchema};
use crate::errors::ApiError;
use crate::filtering::{QueryParams, QueryState, page_content_range};
use crate::models::ListResponse;
use crate::remote::{InMemorySource, RemoteRecordSource};

/// Read-only list endpoint over any record source.
///
/// `GET /` accepts the list query parameters (see
/// [`QueryState::parse`]), answers with
/// `{ "items": [...], "meta": {...} }` and a `Content-Range` header. Malformed
/// parameters are normalized, never rejected.
pub fn source_router<S>(source: S) -> Router
where
    S: RemoteRecordSource + 'static,
    S::Record: Serialize + 'static,
{
    Router::new()
        .route("/", get(get_all_handler::<S>))
        .with_state(Arc::new(source))
}

/// [`source_router`] over an in-memory snapshot.
pub fn list_router<R>(schema: ListSchema, records: Vec<R>) -> Router
where
    R: ListRecord + Clone + Send + Sync + Serialize + 'static,
{
    source_router(InMemorySource::new(schema, records))
}

/// [`list_router`] for a record type that carries its own schema.
pub fn resource_router<R>(records: Vec<R>) -> Router
where
    R: ListResource + Clone + Send + Sync + Serialize + 'static,
{
    source_router(InMemorySource::for_resource(records))
}

async fn get_all_handler<S>(
    State(source): State<Arc<S>>,
    Query(params): Query<QueryParams>,
) -> Result<(HeaderMap, Json<ListResponse<S::Record>>), ApiError>
where
    S: RemoteRecordSource,
    S::Record: Serialize,
{
    let state = QueryState::parse(&params);
    let page = source.fetch(&state).await?;
    let headers = page_content_range(&page, source.resource_name());
    tracing::debug!(
        resource = source.resource_name(),
        query = %state,
        page = page.page_number,
        total_count = page.total_count,
        "Serving list page"
    );
    Ok((headers, Json(ListResponse::from_page(page, &state))))
}
