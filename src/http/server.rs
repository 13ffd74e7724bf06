//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all employee handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::employee::service::EmployeeService;
use crate::employee::types::UpstreamFailure;
use crate::http::handlers;
use crate::http::request::{request_id_of, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::wait_for_shutdown;
use crate::upstream::{EmployeeUpstream, UpstreamClient};

/// Base path of the employee API.
pub const EMPLOYEES_BASE_PATH: &str = "/api/v1/employees";

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: EmployeeService,
}

/// HTTP server for the employee gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server talking to the configured upstream.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamFailure> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        Ok(Self::with_upstream(config, Arc::new(upstream)))
    }

    /// Create a server over an arbitrary upstream implementation.
    pub fn with_upstream(config: GatewayConfig, upstream: Arc<dyn EmployeeUpstream>) -> Self {
        let state = AppState {
            service: EmployeeService::new(upstream),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                EMPLOYEES_BASE_PATH,
                get(handlers::list_employees).post(handlers::create_employee),
            )
            .route(
                &format!("{}/search/{{fragment}}", EMPLOYEES_BASE_PATH),
                get(handlers::search_employees),
            )
            .route(
                &format!("{}/highest-salary", EMPLOYEES_BASE_PATH),
                get(handlers::highest_salary),
            )
            .route(
                &format!("{}/top-ten-earners", EMPLOYEES_BASE_PATH),
                get(handlers::top_ten_earners),
            )
            .route(
                &format!("{}/{{id}}", EMPLOYEES_BASE_PATH),
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id_of(request),
                    )
                }),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuidV4))
    }

    /// Router with all layers applied, for serving or in-process calls.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
