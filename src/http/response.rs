//! Response shaping and error-kind → status mapping.
//!
//! # Responsibilities
//! - Map each `EmployeeError` kind to its HTTP status
//! - Render error bodies (`timestamp`, `message`, optional details)
//! - Render empty collections as 204 No Content
//!
//! # Design Decisions
//! - The status lookup is one exhaustive match; a new error kind fails to
//!   compile until it is mapped
//! - Upstream causes are logged, never returned to clients

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::employee::types::{EmployeeError, FieldError};

/// HTTP status for an error kind.
pub fn status_for(err: &EmployeeError) -> StatusCode {
    match err {
        EmployeeError::NotFound(_) => StatusCode::NOT_FOUND,
        EmployeeError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        EmployeeError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        EmployeeError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub timestamp: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<String>,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            message: message.into(),
            errors: None,
            retry_after: None,
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        match self {
            EmployeeError::NotFound(_) => {
                (status, Json(ErrorBody::new(self.to_string()))).into_response()
            }
            EmployeeError::RateLimited { retry_after_secs } => {
                let mut body =
                    ErrorBody::new("Rate limit exceeded. Please try again after some time.");
                body.retry_after = Some(format!("{}s", retry_after_secs));
                let mut response = (status, Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            }
            EmployeeError::ValidationFailed(fields) => {
                let mut body = ErrorBody::new("Validation error");
                body.errors = Some(fields);
                (status, Json(body)).into_response()
            }
            EmployeeError::UpstreamUnavailable(_) => {
                (status, Json(ErrorBody::new("Failed to process request"))).into_response()
            }
        }
    }
}

/// 413 for an inbound body over the configured limit.
pub fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorBody::new("Request body too large")),
    )
        .into_response()
}

/// 200 with the items, or 204 when there are none.
pub fn list_or_no_content<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::OK, Json(items)).into_response()
    }
}
