//! Inbound HTTP boundary.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID, body validation)
//!     → handlers.rs (call EmployeeService)
//!     → response.rs (204 for empty results, error kind → status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{CreateEmployeeBody, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::status_for;
pub use server::{AppState, HttpServer, EMPLOYEES_BASE_PATH};
