//! Storage of employee records.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::request::EmployeeFilter;
use crate::utils::paging::{Page, PageRequest};

pub mod memory;
pub mod mysql;

pub use memory::InMemoryEmployeeRepository;
pub use mysql::MySqlEmployeeRepository;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn count(&self) -> AppResult<u64>;

    /// Case-insensitive.
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    async fn exists_by_employee_code(&self, employee_code: &str) -> AppResult<bool>;

    /// Case-insensitive.
    async fn find_by_employee_code(&self, employee_code: &str) -> AppResult<Option<Employee>>;

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Employee>>;

    async fn search(&self, filter: &EmployeeFilter, page: &PageRequest)
    -> AppResult<Page<Employee>>;

    /// Fails with `EmployeeAlreadyExists` when the email is taken.
    async fn insert(&self, employee: NewEmployee) -> AppResult<Employee>;

    /// Stores `employee` if its version still matches and returns it with
    /// the version bumped. A stale version is a `ConcurrentModification`.
    async fn update(&self, employee: &Employee) -> AppResult<Employee>;

    /// `false` when nothing was deleted.
    async fn delete(&self, employee: &Employee) -> AppResult<bool>;

    /// Stored email addresses in id order, `limit` at a time.
    async fn emails(&self, offset: u64, limit: u32) -> AppResult<Vec<String>>;
}

/// Substring match used by `search`, case-insensitive.
pub(crate) fn matches_filter(employee: &Employee, filter: &EmployeeFilter) -> bool {
    let contains = |haystack: &str, needle: &str| {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    };

    let name_ok = filter.name.as_deref().is_none_or(|name| {
        contains(&employee.first_name, name)
            || contains(&employee.last_name, name)
            || employee
                .middle_name
                .as_deref()
                .is_some_and(|middle| contains(middle, name))
    });
    let email_ok = filter
        .email
        .as_deref()
        .is_none_or(|email| contains(&employee.email, email));
    let type_ok = filter
        .employee_type
        .is_none_or(|employee_type| employee.employee_type == employee_type);

    name_ok && email_ok && type_ok
}
