//! Employee data model and error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Advisory delay returned to callers when the upstream throttles us.
pub const RATE_LIMIT_RETRY_AFTER_SECS: u64 = 60;

/// An employee as held by the upstream service.
///
/// Serialized with the upstream's `employee_*` field names, which is also the
/// shape exposed to gateway clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Opaque identifier assigned by the upstream.
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: String,

    #[serde(rename = "employee_salary")]
    pub salary: u32,

    #[serde(rename = "employee_age")]
    pub age: u32,

    #[serde(rename = "employee_title")]
    pub title: String,

    /// Derived from `name`; absent only when the name itself is absent.
    #[serde(rename = "employee_email")]
    pub email: Option<String>,
}

/// Input for creating an employee upstream.
///
/// Carries no `id` or `email`; both are assigned upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCreationRequest {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}

/// A single input constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Underlying cause of an `UpstreamUnavailable` error.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    /// Connection, timeout or other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a status we do not map to a specific kind.
    #[error("unexpected upstream status {0}")]
    Status(reqwest::StatusCode),

    /// Response body did not match the documented envelope.
    #[error("malformed upstream envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The upstream URL could not be built for this call.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by every employee operation.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// The referenced employee does not exist upstream.
    #[error("Employee not found: {0}")]
    NotFound(String),

    /// Upstream signaled throttling. Never retried internally.
    #[error("Rate limit exceeded, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// Any other upstream failure.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] UpstreamFailure),

    /// Input failed shape/range constraints before any upstream call.
    #[error("Validation failed: {}", describe_fields(.0))]
    ValidationFailed(Vec<FieldError>),
}

impl EmployeeError {
    pub fn rate_limited() -> Self {
        Self::RateLimited {
            retry_after_secs: RATE_LIMIT_RETRY_AFTER_SECS,
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::RateLimited { .. } => "rate_limited",
            Self::UpstreamUnavailable(_) => "unavailable",
            Self::ValidationFailed(_) => "validation_failed",
        }
    }
}

impl From<UpstreamFailure> for EmployeeError {
    fn from(failure: UpstreamFailure) -> Self {
        Self::UpstreamUnavailable(failure)
    }
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_upstream_field_names() {
        let record = EmployeeRecord {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            salary: 50000,
            age: 30,
            title: "Developer".to_string(),
            email: Some("johndoe@company.com".to_string()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["employee_name"], "John Doe");
        assert_eq!(json["employee_salary"], 50000);
        assert_eq!(json["employee_email"], "johndoe@company.com");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_creation_request_uses_plain_field_names() {
        let request = EmployeeCreationRequest {
            name: "Jane Smith".to_string(),
            salary: 60000,
            age: 35,
            title: "Manager".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Jane Smith",
                "salary": 60000,
                "age": 35,
                "title": "Manager"
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = EmployeeError::rate_limited();
        assert_eq!(err.to_string(), "Rate limit exceeded, retry after 60 seconds");

        let err = EmployeeError::ValidationFailed(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("age", "Age must be at least 18"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: Name is required, age: Age must be at least 18"
        );

        let err = EmployeeError::from(UpstreamFailure::Status(reqwest::StatusCode::BAD_GATEWAY));
        assert!(err.to_string().contains("502"));
        assert_eq!(err.kind(), "unavailable");
    }
}
