//! # Error Handling
//!
//! The list engine itself never fails: malformed query parameters are
//! normalized, not rejected. Errors exist only at the edges:
//!
//! - [`SchemaError`]: a list vocabulary loaded from configuration is malformed
//!   or inconsistent
//! - [`SourceError`]: a remote record source failed or timed out
//! - [`ApiError`]: the HTTP list adapter's error, with a status code and a
//!   sanitized user message
//!
//! ## Philosophy
//!
//! **Never expose internal errors to users**. Source failures are logged
//! server-side through `tracing` and answered with a generic message.
//!
//! ## Logging
//!
//! Internal errors are logged using the `tracing` crate. To see them, install
//! a subscriber in your application:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt()
//!     .with_target(false)
//!     .compact()
//!     .init();
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::validation::ValidationErrors;

/// A record source could not answer a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing store rejected or dropped the request
    Unavailable(String),
    /// No answer within the allotted time
    Timeout(Duration),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "record source unavailable: {reason}"),
            Self::Timeout(after) => write!(f, "record source timed out after {}ms", after.as_millis()),
        }
    }
}

impl std::error::Error for SourceError {}

/// A list schema loaded from configuration could not be used.
#[derive(Debug)]
pub enum SchemaError {
    /// The configuration is not valid JSON for a schema
    Parse(serde_json::Error),
    /// The schema parsed but failed [`ListSchema::validate`](crate::ListSchema::validate)
    Invalid(ValidationErrors),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed list schema: {err}"),
            Self::Invalid(errors) => write!(f, "invalid list schema: {errors}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(errors) => Some(errors),
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 503 Service Unavailable or 504 Gateway Timeout - the record source failed
    Source {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: SourceError,
    },
}

impl ApiError {
    /// Create an error from a failed record source
    ///
    /// The source error details are logged but NOT sent to the user.
    #[must_use]
    pub fn from_source(err: SourceError) -> Self {
        let message = match err {
            SourceError::Unavailable(_) => "The record source is unavailable",
            SourceError::Timeout(_) => "The record source did not respond in time",
        };
        Self::Source {
            message: message.to_string(),
            internal: err,
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Source {
                internal: SourceError::Unavailable(_),
                ..
            } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Source {
                internal: SourceError::Timeout(_),
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Get the user-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Source { message, .. } => message,
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Source { internal, .. } => {
                tracing::error!(error = %internal, "Record source error occurred");
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        Self::from_source(err)
    }
}
