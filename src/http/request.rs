//! Request handling and input validation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Validate creation bodies before any upstream call
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - All failing fields are reported together, not just the first

use axum::http::{HeaderName, HeaderValue, Request};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::employee::types::{EmployeeCreationRequest, EmployeeError, FieldError};

/// Header carrying the request ID in both directions.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const TEXT_MIN_CHARS: usize = 2;
const TEXT_MAX_CHARS: usize = 100;
const AGE_MIN: i64 = 18;
const AGE_MAX: i64 = 100;

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID header, if present.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Inbound body for employee creation, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEmployeeBody {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub age: Option<i64>,
    pub title: Option<String>,
}

impl CreateEmployeeBody {
    /// Check every constraint and build the upstream request.
    pub fn validate(self) -> Result<EmployeeCreationRequest, EmployeeError> {
        let mut errors = Vec::new();

        let name = check_text(self.name, "name", "Name", &mut errors);
        let title = check_text(self.title, "title", "Title", &mut errors);

        let salary = match self.salary {
            None => {
                errors.push(FieldError::new("salary", "Salary is required"));
                None
            }
            Some(s) if s < 0 => {
                errors.push(FieldError::new("salary", "Salary must be non-negative"));
                None
            }
            Some(s) => match u32::try_from(s) {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.push(FieldError::new(
                        "salary",
                        format!("Salary must be at most {}", u32::MAX),
                    ));
                    None
                }
            },
        };

        let age = match self.age {
            None => {
                errors.push(FieldError::new("age", "Age is required"));
                None
            }
            Some(a) if a < AGE_MIN => {
                errors.push(FieldError::new("age", "Age must be at least 18"));
                None
            }
            Some(a) if a > AGE_MAX => {
                errors.push(FieldError::new("age", "Age must be at most 100"));
                None
            }
            Some(a) => u32::try_from(a).ok(),
        };

        match (name, salary, age, title) {
            (Some(name), Some(salary), Some(age), Some(title)) if errors.is_empty() => {
                Ok(EmployeeCreationRequest {
                    name,
                    salary,
                    age,
                    title,
                })
            }
            _ => Err(EmployeeError::ValidationFailed(errors)),
        }
    }
}

fn check_text(
    value: Option<String>,
    field: &'static str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.push(FieldError::new(field, format!("{} is required", label)));
            return None;
        }
    };

    let len = value.chars().count();
    if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&len) {
        errors.push(FieldError::new(
            field,
            format!(
                "{} must be between {} and {} characters",
                label, TEXT_MIN_CHARS, TEXT_MAX_CHARS
            ),
        ));
        return None;
    }
    Some(value)
}
