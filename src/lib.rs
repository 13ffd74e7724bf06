//! Employee gateway library.
//!
//! Proxies and aggregates an upstream employee-record API behind a stable
//! REST surface with a fixed error taxonomy.

pub mod config;
pub mod employee;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::GatewayConfig;
pub use employee::{EmployeeError, EmployeeRecord, EmployeeService};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{EmployeeUpstream, UpstreamClient};
