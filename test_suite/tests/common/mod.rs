#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_RANGE};
use recordview::QueryParams;
use serde_json::Value;
use tower::ServiceExt;

/// Build URL parameters from literal pairs.
pub fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

/// Response of a `GET` against a test router.
pub struct ListReply {
    pub status: StatusCode,
    pub content_range: Option<String>,
    pub body: Value,
}

impl ListReply {
    pub fn items(&self) -> &[Value] {
        self.body["items"].as_array().map_or(&[], Vec::as_slice)
    }

    pub fn strings(&self, key: &str) -> Vec<String> {
        self.items()
            .iter()
            .filter_map(|item| item[key].as_str().map(str::to_string))
            .collect()
    }
}

pub async fn get(app: &Router, uri: &str) -> ListReply {
    let response = app
        .clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_range = response
        .headers()
        .get(CONTENT_RANGE)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    ListReply {
        status,
        content_range,
        body,
    }
}
