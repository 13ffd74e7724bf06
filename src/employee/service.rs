//! Employee operations composed from upstream calls and aggregation.
//!
//! Every read performs exactly one upstream `list_all` and then applies a
//! pure aggregation. Nothing is cached between calls.

use std::sync::Arc;

use crate::employee::aggregate;
use crate::employee::types::{EmployeeCreationRequest, EmployeeRecord, EmployeeResult};
use crate::upstream::EmployeeUpstream;

/// Orchestrates logical employee operations over an upstream.
#[derive(Clone)]
pub struct EmployeeService {
    upstream: Arc<dyn EmployeeUpstream>,
}

impl EmployeeService {
    pub fn new(upstream: Arc<dyn EmployeeUpstream>) -> Self {
        Self { upstream }
    }

    pub async fn get_all(&self) -> EmployeeResult<Vec<EmployeeRecord>> {
        self.upstream.list_all().await
    }

    /// Employees whose name contains `fragment`, case-insensitively.
    pub async fn search(&self, fragment: &str) -> EmployeeResult<Vec<EmployeeRecord>> {
        let employees = self.upstream.list_all().await?;
        Ok(aggregate::search(employees, fragment))
    }

    /// Highest salary, `None` when upstream holds no employees.
    pub async fn highest_salary(&self) -> EmployeeResult<Option<u32>> {
        let employees = self.upstream.list_all().await?;
        Ok(aggregate::max_salary(&employees))
    }

    pub async fn top10_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.upstream.list_all().await?;
        Ok(aggregate::top10_by_name(employees))
    }

    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<EmployeeRecord> {
        self.upstream.get_by_id(id).await
    }

    pub async fn create(
        &self,
        request: &EmployeeCreationRequest,
    ) -> EmployeeResult<EmployeeRecord> {
        self.upstream.create(request).await
    }

    /// Delete the employee with `id`, returning the name that was deleted.
    ///
    /// Upstream deletes by name, so the id is first resolved to a name. The
    /// two calls are not atomic: if the name disappears in between, the
    /// delete fails with `NotFound`. Records sharing a name are resolved by
    /// upstream.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<String> {
        let employee = self.upstream.get_by_id(id).await?;
        tracing::info!(id = %id, name = %employee.name, "Deleting employee with name");
        self.upstream.delete_by_name(&employee.name).await?;
        Ok(employee.name)
    }
}

impl std::fmt::Debug for EmployeeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeService").finish_non_exhaustive()
    }
}
