//! Derived views over a fetched employee set.
//!
//! # Responsibilities
//! - Case-insensitive name search
//! - Maximum salary
//! - Top earners by salary
//!
//! # Design Decisions
//! - Pure functions over an in-memory slice; no network access
//! - Source order is preserved for search results and salary ties

use crate::employee::types::EmployeeRecord;

/// Number of names returned by [`top10_by_name`].
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `fragment`, ignoring case.
///
/// An empty fragment matches every employee.
pub fn search(employees: Vec<EmployeeRecord>, fragment: &str) -> Vec<EmployeeRecord> {
    let needle = fragment.to_lowercase();
    employees
        .into_iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Highest salary in the set, or `None` when the set is empty.
pub fn max_salary(employees: &[EmployeeRecord]) -> Option<u32> {
    employees.iter().map(|e| e.salary).max()
}

/// Names of the `limit` highest earners, salary descending.
///
/// Equal salaries keep their source order.
pub fn top_earner_names(mut employees: Vec<EmployeeRecord>, limit: usize) -> Vec<String> {
    // Vec::sort_by is stable
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees
        .into_iter()
        .take(limit)
        .map(|e| e.name)
        .collect()
}

/// Names of the ten highest earners.
pub fn top10_by_name(employees: Vec<EmployeeRecord>) -> Vec<String> {
    top_earner_names(employees, TOP_EARNERS_LIMIT)
}
