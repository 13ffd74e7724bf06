//! HTTP client for the upstream employee API.
//!
//! # Responsibilities
//! - Build upstream URLs from the configured base
//! - Issue list/get/create/delete calls and decode envelopes
//! - Classify statuses and transport failures into error kinds
//!
//! # Design Decisions
//! - No retries: 429 is surfaced immediately with a fixed advisory
//! - Timeouts live in the reqwest client configuration
//! - Dropping a call's future aborts the underlying request

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::UpstreamConfig;
use crate::employee::types::{
    EmployeeCreationRequest, EmployeeError, EmployeeRecord, EmployeeResult, UpstreamFailure,
    RATE_LIMIT_RETRY_AFTER_SECS,
};
use crate::observability::metrics;
use crate::upstream::types::{DeleteByName, EmployeeUpstream, Envelope, WireEmployee};

const EMPLOYEES_PATH: &str = "employees";

/// reqwest-backed implementation of [`EmployeeUpstream`].
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a client for the upstream described by `config`.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamFailure> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            UpstreamFailure::InvalidUrl(format!("'{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(base_url = %base_url, "Upstream client initialized");

        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, UpstreamFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamFailure::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the response if its status is 2xx.
    ///
    /// `subject` names what a 404 refers to.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        subject: &str,
    ) -> EmployeeResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Error occurred while calling employee API");
            EmployeeError::from(UpstreamFailure::Transport(e))
        })?;

        match classify_status(response.status(), subject) {
            None => Ok(response),
            Some(err) => {
                match &err {
                    EmployeeError::RateLimited { .. } => tracing::warn!(
                        operation,
                        retry_after_secs = RATE_LIMIT_RETRY_AFTER_SECS,
                        "Upstream rate limit exceeded"
                    ),
                    EmployeeError::NotFound(subject) => tracing::debug!(
                        operation,
                        subject = %subject,
                        "Upstream reported not found"
                    ),
                    _ => tracing::error!(
                        operation,
                        status = %response.status(),
                        "Unexpected status from employee API"
                    ),
                }
                Err(err)
            }
        }
    }

    /// Decode a successful response envelope and return its payload.
    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> EmployeeResult<T> {
        let body = response
            .bytes()
            .await
            .map_err(|e| EmployeeError::from(UpstreamFailure::Transport(e)))?;

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(operation, error = %e, "Malformed envelope from employee API");
            EmployeeError::from(UpstreamFailure::Malformed(e))
        })?;

        tracing::debug!(
            operation,
            status = envelope.status.as_deref().unwrap_or("none"),
            "Upstream envelope received"
        );
        Ok(envelope.data)
    }

    async fn fetch_all(&self) -> EmployeeResult<Vec<EmployeeRecord>> {
        let url = self.url(&[EMPLOYEES_PATH])?;
        let response = self.send("list_all", self.client.get(url), EMPLOYEES_PATH).await?;
        let data: Vec<WireEmployee> = Self::decode("list_all", response).await?;
        Ok(data.into_iter().map(EmployeeRecord::from).collect())
    }

    async fn fetch_one(&self, id: &str) -> EmployeeResult<EmployeeRecord> {
        let url = self.url(&[EMPLOYEES_PATH, id])?;
        let response = self.send("get_by_id", self.client.get(url), id).await?;
        let data: WireEmployee = Self::decode("get_by_id", response).await?;
        Ok(data.into())
    }

    async fn submit(&self, request: &EmployeeCreationRequest) -> EmployeeResult<EmployeeRecord> {
        let url = self.url(&[EMPLOYEES_PATH])?;
        let response = self
            .send("create", self.client.post(url).json(request), &request.name)
            .await?;
        let data: WireEmployee = Self::decode("create", response).await?;
        Ok(data.into())
    }

    async fn remove(&self, name: &str) -> EmployeeResult<()> {
        let url = self.url(&[EMPLOYEES_PATH])?;
        let body = DeleteByName { name };
        self.send("delete_by_name", self.client.delete(url).json(&body), name)
            .await?;
        Ok(())
    }
}

/// Map a non-2xx upstream status to its error kind.
pub fn classify_status(status: StatusCode, subject: &str) -> Option<EmployeeError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => EmployeeError::NotFound(subject.to_string()),
        StatusCode::TOO_MANY_REQUESTS => EmployeeError::rate_limited(),
        other => EmployeeError::from(UpstreamFailure::Status(other)),
    })
}

fn observe<T>(
    operation: &'static str,
    start: Instant,
    result: EmployeeResult<T>,
) -> EmployeeResult<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_upstream_call(operation, outcome, start);
    result
}

#[async_trait]
impl EmployeeUpstream for UpstreamClient {
    async fn list_all(&self) -> EmployeeResult<Vec<EmployeeRecord>> {
        let start = Instant::now();
        observe("list_all", start, self.fetch_all().await)
    }

    async fn get_by_id(&self, id: &str) -> EmployeeResult<EmployeeRecord> {
        let start = Instant::now();
        observe("get_by_id", start, self.fetch_one(id).await)
    }

    async fn create(&self, request: &EmployeeCreationRequest) -> EmployeeResult<EmployeeRecord> {
        let start = Instant::now();
        observe("create", start, self.submit(request).await)
    }

    async fn delete_by_name(&self, name: &str) -> EmployeeResult<()> {
        let start = Instant::now();
        observe("delete_by_name", start, self.remove(name).await)
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            connect_timeout_secs: 1,
            request_timeout_secs: 2,
        }
    }

    #[test]
    fn test_classify_status() {
        assert!(classify_status(StatusCode::OK, "1").is_none());
        assert!(classify_status(StatusCode::NO_CONTENT, "1").is_none());

        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "42"),
            Some(EmployeeError::NotFound(id)) if id == "42"
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "42"),
            Some(EmployeeError::RateLimited { retry_after_secs: 60 })
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "42"),
            Some(EmployeeError::UpstreamUnavailable(UpstreamFailure::Status(
                StatusCode::BAD_GATEWAY
            )))
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "42"),
            Some(EmployeeError::UpstreamUnavailable(_))
        ));
    }

    #[test]
    fn test_url_building() {
        let client = UpstreamClient::new(&test_config("http://localhost:8112/api/v1")).unwrap();
        assert_eq!(
            client.url(&[EMPLOYEES_PATH]).unwrap().as_str(),
            "http://localhost:8112/api/v1/employees"
        );

        let client = UpstreamClient::new(&test_config("http://localhost:8112/api/v1/")).unwrap();
        assert_eq!(
            client.url(&[EMPLOYEES_PATH, "abc"]).unwrap().as_str(),
            "http://localhost:8112/api/v1/employees/abc"
        );
    }

    #[test]
    fn test_url_escapes_id() {
        let client = UpstreamClient::new(&test_config("http://localhost:8112/api/v1")).unwrap();
        assert_eq!(
            client.url(&[EMPLOYEES_PATH, "a/b c"]).unwrap().as_str(),
            "http://localhost:8112/api/v1/employees/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = UpstreamClient::new(&test_config("not a url"));
        assert!(matches!(result, Err(UpstreamFailure::InvalidUrl(_))));
    }
}
