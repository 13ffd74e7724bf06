//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode, Uri},
    Router,
};
use employee_gateway::config::{GatewayConfig, UpstreamConfig};
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A request received by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    /// Base URL to configure the gateway's upstream client with.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.base_url(),
            connect_timeout_secs: 1,
            request_timeout_secs: 2,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` of every request received so far.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `respond` maps each request to a status code and JSON body.
pub async fn start_mock_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    start_delayed_upstream(Duration::ZERO, respond).await
}

/// Like [`start_mock_upstream`], but every response is held back by `delay`.
pub async fn start_delayed_upstream<F>(delay: Duration, respond: F) -> MockUpstream
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorded = requests.clone();
    let app = Router::new().fallback(move |method: Method, uri: Uri, body: String| {
        let respond = respond.clone();
        let recorded = recorded.clone();
        async move {
            let request = RecordedRequest {
                method: method.to_string(),
                path: uri.path().to_string(),
                body,
            };
            let (status, body) = respond(&request);
            recorded.lock().unwrap().push(request);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests }
}

/// Mock upstream answering every request with the same status and body.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_mock_upstream(move |_| (status, body.to_string())).await
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Upstream wire representation of an employee.
pub fn wire_employee(id: &str, name: &str, salary: u32) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "Engineer",
        "employee_email": format!("{}@company.com", name.to_lowercase().replace(' ', "")),
    })
}

/// Wrap `data` in the upstream response envelope.
pub fn envelope(data: Value) -> String {
    json!({ "data": data, "status": "Successfully processed request." }).to_string()
}

/// The three-employee set used across scenarios.
pub fn sample_employees() -> Value {
    json!([
        wire_employee("1", "John Doe", 50000),
        wire_employee("2", "Jane Smith", 60000),
        wire_employee("3", "Bob Johnson", 55000),
    ])
}

/// A running gateway bound to an ephemeral port.
pub struct RunningGateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway against `upstream`.
pub async fn start_gateway(upstream: &MockUpstream) -> RunningGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream = upstream.upstream_config();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Listener is already bound; give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningGateway { addr, shutdown }
}
