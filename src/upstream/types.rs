//! Upstream wire contract and the client seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::employee::email::derive_email;
use crate::employee::types::{EmployeeCreationRequest, EmployeeRecord, EmployeeResult};

/// Operations offered by the upstream employee API.
///
/// Implementations perform no retries; every failure is surfaced as the
/// matching [`EmployeeError`](crate::employee::EmployeeError) kind.
#[async_trait]
pub trait EmployeeUpstream: Send + Sync {
    /// `GET /employees`: the complete employee set.
    async fn list_all(&self) -> EmployeeResult<Vec<EmployeeRecord>>;

    /// `GET /employees/{id}`.
    async fn get_by_id(&self, id: &str) -> EmployeeResult<EmployeeRecord>;

    /// `POST /employees`: returns the record with its upstream-assigned id.
    async fn create(&self, request: &EmployeeCreationRequest) -> EmployeeResult<EmployeeRecord>;

    /// `DELETE /employees`: upstream deletion is keyed by name.
    async fn delete_by_name(&self, name: &str) -> EmployeeResult<()>;
}

/// Response envelope wrapping every upstream payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub status: Option<String>,
}

/// Employee as it appears on the upstream wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireEmployee {
    pub id: String,
    pub employee_name: String,
    pub employee_salary: u32,
    pub employee_age: u32,
    pub employee_title: String,
    #[serde(default)]
    pub employee_email: Option<String>,
}

impl From<WireEmployee> for EmployeeRecord {
    fn from(wire: WireEmployee) -> Self {
        let email = wire
            .employee_email
            .or_else(|| derive_email(Some(&wire.employee_name)));
        Self {
            id: wire.id,
            name: wire.employee_name,
            salary: wire.employee_salary,
            age: wire.employee_age,
            title: wire.employee_title,
            email,
        }
    }
}

/// Body of the upstream delete call.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteByName<'a> {
    pub name: &'a str,
}
