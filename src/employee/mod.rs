//! Employee domain subsystem.
//!
//! # Data Flow
//! ```text
//! Read operations:
//!     service.rs (one upstream list_all per call)
//!     → aggregate.rs (search / max salary / top earners)
//!     → caller
//!
//! Delete by id:
//!     service.rs → upstream get_by_id (id → name)
//!               → upstream delete_by_name
//! ```
//!
//! # Design Decisions
//! - Errors form a closed taxonomy (types.rs); nothing is recovered locally
//! - Email is always derived from the name, never supplied by callers
//! - No state is kept between operations

pub mod aggregate;
pub mod email;
pub mod service;
pub mod types;

pub use email::derive_email;
pub use service::EmployeeService;
pub use types::{
    EmployeeCreationRequest, EmployeeError, EmployeeRecord, EmployeeResult, FieldError,
    UpstreamFailure,
};
