//! Upstream employee API integration.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → EmployeeUpstream trait (types.rs)
//!     → client.rs (reqwest call, timeout from config)
//!     → status classification (404 / 429 / other)
//!     → envelope decode + wire mapping (types.rs)
//! ```
//!
//! # Wire Contract
//! - `GET /employees` → `{ data: [employee...], status }`
//! - `GET /employees/{id}` → `{ data: employee, status }` or 404
//! - `POST /employees` with `{ name, salary, age, title }` → `{ data: employee, status }`
//! - `DELETE /employees` with `{ name }` → empty success or 404
//! - Any call may answer 429 or 5xx

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::EmployeeUpstream;
