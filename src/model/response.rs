use chrono_tz::Tz;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::{Employee, EmployeeType, Money};
use crate::utils::timezone::format_in_zone;

/// API view of an employee. Internal id and version are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[serde(rename = "empId")]
    #[schema(example = "JODO1234")]
    pub employee_code: String,
    #[serde(rename = "firstName")]
    #[schema(example = "John")]
    pub first_name: String,
    #[serde(rename = "middleName", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(rename = "lastName")]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    #[serde(rename = "empType")]
    pub employee_type: EmployeeType,
    pub salary: Money,
    /// Creation time rendered in the caller's time zone.
    #[schema(example = "2024-03-01 09:15:00AM -05:00")]
    pub employment_date: String,
}

impl EmployeeResponse {
    pub fn new(employee: &Employee, zone: Tz) -> Self {
        Self {
            employee_code: employee.employee_code.clone(),
            first_name: employee.first_name.clone(),
            middle_name: employee.middle_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            employee_type: employee.employee_type,
            salary: employee.salary,
            employment_date: format_in_zone(&employee.creation_date, zone),
        }
    }
}
