//! Request bodies accepted by the employee endpoints and their validation.
//!
//! Every body is deserialized leniently (missing strings become empty) and
//! then checked by `validate`, which reports all violations at once and
//! returns the checked, trimmed form the service works with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult, ValidationError};
use crate::model::employee::{EmployeeType, Money};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 100;

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Michael")]
    pub middle_name: Option<String>,
    #[serde(default)]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(default)]
    #[schema(example = "FULL-TIME")]
    pub employee_type: String,
    pub salary: Option<Money>,
}

/// Full update. The email address cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    #[schema(example = "John")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[serde(default)]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(default)]
    #[schema(example = "PART-TIME")]
    pub employee_type: String,
    pub salary: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeNameRequest {
    #[serde(default)]
    #[schema(example = "Jane")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[serde(default)]
    #[schema(example = "Roe")]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTypeRequest {
    #[serde(default)]
    #[schema(example = "CONTRACT")]
    pub employee_type: String,
    /// Replaced together with the type when present.
    pub salary: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Matched against first, middle and last name.
    #[schema(example = "doe")]
    pub name: Option<String>,
    #[schema(example = "example.com")]
    pub email: Option<String>,
    #[schema(example = "FULL-TIME")]
    pub employee_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeName {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl std::fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.middle_name {
            Some(middle) => write!(f, "{} {} {}", self.first_name, middle, self.last_name),
            None => write!(f, "{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub name: EmployeeName,
    pub employee_type: EmployeeType,
    pub salary: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployeeDetails {
    pub email: String,
    pub profile: EmployeeProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTypeChange {
    pub employee_type: EmployeeType,
    pub salary: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub employee_type: Option<EmployeeType>,
}

/// Collects violations for one request object.
struct Violations {
    object: &'static str,
    errors: Vec<ValidationError>,
}

impl Violations {
    fn new(object: &'static str) -> Self {
        Self {
            object,
            errors: Vec::new(),
        }
    }

    fn reject(&mut self, field: &str, value: Option<&str>, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(self.object, field, value, message));
    }

    fn required_text(&mut self, field: &str, label: &str, value: &str, max: usize) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.reject(field, Some(value), format!("{} must not be blank", label));
        } else if trimmed.chars().count() > max {
            self.reject(
                field,
                Some(value),
                format!("{} must be at most {} characters", label, max),
            );
        }
        trimmed.to_string()
    }

    fn optional_text(&mut self, field: &str, label: &str, value: Option<&str>, max: usize) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
        if trimmed.chars().count() > max {
            self.reject(
                field,
                Some(trimmed),
                format!("{} must be at most {} characters", label, max),
            );
        }
        Some(trimmed.to_string())
    }

    fn name(&mut self, first: &str, middle: Option<&str>, last: &str) -> EmployeeName {
        EmployeeName {
            first_name: self.required_text("firstName", "First name", first, MAX_NAME_LENGTH),
            middle_name: self.optional_text("middleName", "Middle name", middle, MAX_NAME_LENGTH),
            last_name: self.required_text("lastName", "Last name", last, MAX_NAME_LENGTH),
        }
    }

    fn email(&mut self, value: &str) -> String {
        let email = self.required_text("email", "Email", value, MAX_EMAIL_LENGTH);
        if !email.is_empty() && !is_valid_email(&email) {
            self.reject("email", Some(value), "Email address is not valid");
        }
        email
    }

    fn employee_type(&mut self, value: &str) -> Option<EmployeeType> {
        if value.trim().is_empty() {
            self.reject("employeeType", Some(value), "Employee type must not be blank");
            return None;
        }
        match value.trim().parse() {
            Ok(employee_type) => Some(employee_type),
            Err(_) => {
                self.reject(
                    "employeeType",
                    Some(value),
                    format!(
                        "Employee type must be one of {}",
                        EmployeeType::all_names().join(", ")
                    ),
                );
                None
            }
        }
    }

    fn salary(&mut self, value: Option<&Money>) -> Option<Money> {
        match value {
            None => {
                self.reject("salary", None, "Salary must be provided");
                None
            }
            Some(money) => self.positive_salary(money),
        }
    }

    fn positive_salary(&mut self, money: &Money) -> Option<Money> {
        if money.amount <= Decimal::ZERO {
            self.reject(
                "salary.amount",
                Some(&money.amount.to_string()),
                "Salary amount must be positive",
            );
            return None;
        }
        Some(*money)
    }

    fn finish<T>(self, value: Option<T>) -> AppResult<T> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(AppError::Validation(self.errors)),
        }
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !host.starts_with('.')
        && !host.ends_with('.')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

impl CreateEmployeeRequest {
    pub fn validate(&self) -> AppResult<NewEmployeeDetails> {
        let mut v = Violations::new("createEmployeeRequest");
        let email = v.email(&self.email);
        let name = v.name(&self.first_name, self.middle_name.as_deref(), &self.last_name);
        let employee_type = v.employee_type(&self.employee_type);
        let salary = v.salary(self.salary.as_ref());

        let details = employee_type.zip(salary).map(|(employee_type, salary)| NewEmployeeDetails {
            email,
            profile: EmployeeProfile {
                name,
                employee_type,
                salary,
            },
        });
        v.finish(details)
    }
}

impl UpdateEmployeeRequest {
    pub fn validate(&self) -> AppResult<EmployeeProfile> {
        let mut v = Violations::new("updateEmployeeRequest");
        let name = v.name(&self.first_name, self.middle_name.as_deref(), &self.last_name);
        let employee_type = v.employee_type(&self.employee_type);
        let salary = v.salary(self.salary.as_ref());

        let profile = employee_type.zip(salary).map(|(employee_type, salary)| EmployeeProfile {
            name,
            employee_type,
            salary,
        });
        v.finish(profile)
    }
}

impl EmployeeNameRequest {
    pub fn validate(&self) -> AppResult<EmployeeName> {
        let mut v = Violations::new("employeeNameRequest");
        let name = v.name(&self.first_name, self.middle_name.as_deref(), &self.last_name);
        v.finish(Some(name))
    }
}

impl EmployeeTypeRequest {
    pub fn validate(&self) -> AppResult<EmployeeTypeChange> {
        let mut v = Violations::new("employeeTypeRequest");
        let employee_type = v.employee_type(&self.employee_type);
        let salary = match &self.salary {
            Some(money) => v.positive_salary(money).map(Some),
            None => Some(None),
        };

        let change = employee_type
            .zip(salary)
            .map(|(employee_type, salary)| EmployeeTypeChange {
                employee_type,
                salary,
            });
        v.finish(change)
    }
}

impl SearchCriteria {
    pub fn validate(&self) -> AppResult<EmployeeFilter> {
        let mut v = Violations::new("searchCriteria");
        let name = v.optional_text("name", "Name", self.name.as_deref(), MAX_NAME_LENGTH);
        let email = v.optional_text("email", "Email", self.email.as_deref(), MAX_EMAIL_LENGTH);
        let employee_type = match self.employee_type.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => v.employee_type(value),
            _ => None,
        };

        v.finish(Some(EmployeeFilter {
            name,
            email,
            employee_type,
        }))
    }
}
