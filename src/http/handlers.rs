//! Employee REST handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::employee::types::{EmployeeError, EmployeeResult, FieldError};
use crate::http::request::CreateEmployeeBody;
use crate::http::response::{list_or_no_content, payload_too_large};
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn list_employees(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    tracing::info!("Received request to fetch all employees");

    let result = state.service.get_all().await.map(|employees| {
        tracing::info!(count = employees.len(), "Retrieved employees");
        list_or_no_content(employees)
    });
    finish("get_all", start, result)
}

pub async fn search_employees(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> Response {
    let start = Instant::now();
    tracing::info!(fragment = %fragment, "Searching employees by name fragment");

    let result = state.service.search(&fragment).await.map(|employees| {
        tracing::info!(count = employees.len(), fragment = %fragment, "Search complete");
        list_or_no_content(employees)
    });
    finish("search", start, result)
}

pub async fn get_employee(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let start = Instant::now();
    tracing::info!(id = %id, "Fetching employee");

    let result = state
        .service
        .get_by_id(&id)
        .await
        .map(|employee| (StatusCode::OK, Json(employee)).into_response());
    finish("get_by_id", start, result)
}

pub async fn highest_salary(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let result = state.service.highest_salary().await.map(|salary| match salary {
        Some(salary) => {
            tracing::info!(salary, "Highest salary found");
            (StatusCode::OK, Json(salary)).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    });
    finish("highest_salary", start, result)
}

pub async fn top_ten_earners(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let result = state.service.top10_names().await.map(|names| {
        tracing::info!(count = names.len(), "Retrieved top earning employees");
        list_or_no_content(names)
    });
    finish("top10_names", start, result)
}

pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeBody>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let result = create_inner(&state, payload).await;
    finish("create", start, result)
}

async fn create_inner(
    state: &AppState,
    payload: Result<Json<CreateEmployeeBody>, JsonRejection>,
) -> EmployeeResult<Response> {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(error = %rejection.body_text(), "Rejected oversized request body");
            return Ok(payload_too_large());
        }
        Err(rejection) => {
            return Err(EmployeeError::ValidationFailed(vec![FieldError::new(
                "body",
                rejection.body_text(),
            )]))
        }
    };
    let request = body.validate()?;

    tracing::info!(name = %request.name, "Creating new employee");
    let created = state.service.create(&request).await?;
    tracing::info!(id = %created.id, "Employee created successfully");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let start = Instant::now();
    tracing::info!(id = %id, "Deleting employee");

    let result = state.service.delete_by_id(&id).await.map(|name| {
        tracing::info!(id = %id, name = %name, "Employee deleted successfully");
        StatusCode::NO_CONTENT.into_response()
    });
    finish("delete_by_id", start, result)
}

/// Render the outcome, log failures and record request metrics.
fn finish(operation: &'static str, start: Instant, result: EmployeeResult<Response>) -> Response {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            match &err {
                EmployeeError::NotFound(subject) => {
                    tracing::warn!(operation, subject = %subject, "Employee not found")
                }
                EmployeeError::RateLimited { .. } => {
                    tracing::warn!(operation, "Rejected: upstream rate limited")
                }
                EmployeeError::ValidationFailed(_) => {
                    tracing::info!(operation, error = %err, "Rejected invalid input")
                }
                EmployeeError::UpstreamUnavailable(cause) => {
                    tracing::error!(operation, error = %cause, "Upstream failure")
                }
            }
            err.into_response()
        }
    };
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}
