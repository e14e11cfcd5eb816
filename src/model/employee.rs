use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

use crate::utils::currency::{Currency, DEFAULT_CURRENCY};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum EmployeeType {
    #[serde(rename = "FULL-TIME")]
    #[strum(serialize = "FULL-TIME")]
    FullTime,
    #[serde(rename = "PART-TIME")]
    #[strum(serialize = "PART-TIME")]
    PartTime,
    #[serde(rename = "CONTRACT")]
    #[strum(serialize = "CONTRACT")]
    Contract,
}

impl EmployeeType {
    pub fn all_names() -> Vec<&'static str> {
        EmployeeType::iter().map(Into::into).collect()
    }
}

fn default_currency() -> Currency {
    DEFAULT_CURRENCY
}

/// A monetary amount. `amount` travels as a quoted decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Money {
    #[schema(value_type = String, example = "4500.00")]
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    #[schema(value_type = String, example = "USD")]
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

/// Persisted payroll record.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: u64,
    pub employee_code: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub employee_type: EmployeeType,
    pub salary: Money,
    pub creation_date: DateTime<Utc>,
    pub version: u32,
}

impl Employee {
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref() {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// An employee that has not been stored yet; the repository assigns `id`
/// and starts `version` at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub employee_code: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub employee_type: EmployeeType,
    pub salary: Money,
    pub creation_date: DateTime<Utc>,
}

impl NewEmployee {
    pub fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            employee_code: self.employee_code,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            email: self.email,
            employee_type: self.employee_type,
            salary: self.salary,
            creation_date: self.creation_date,
            version: 0,
        }
    }
}

/// Serialized employee fields and the storage columns behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum EmployeeField {
    #[strum(serialize = "firstName")]
    FirstName,
    #[strum(serialize = "lastName")]
    LastName,
    #[strum(serialize = "middleName")]
    MiddleName,
    #[strum(serialize = "empId")]
    EmployeeCode,
    #[strum(serialize = "empType")]
    EmployeeType,
    #[strum(serialize = "email")]
    Email,
    #[strum(serialize = "salary.amount")]
    SalaryAmount,
    #[strum(serialize = "salary.currency")]
    SalaryCurrency,
    #[strum(serialize = "employment_date")]
    CreationDate,
}

impl EmployeeField {
    pub const DEFAULT_SORT: EmployeeField = EmployeeField::EmployeeCode;

    pub fn json_name(self) -> &'static str {
        self.into()
    }

    pub fn column(self) -> &'static str {
        match self {
            EmployeeField::FirstName => "FIRST_NAME",
            EmployeeField::LastName => "LAST_NAME",
            EmployeeField::MiddleName => "MIDDLE_NAME",
            EmployeeField::EmployeeCode => "EMPLOYEE_ID",
            EmployeeField::EmployeeType => "EMPLOYEE_TYPE",
            EmployeeField::Email => "EMAIL",
            EmployeeField::SalaryAmount => "sal_amount",
            EmployeeField::SalaryCurrency => "sal_currency",
            EmployeeField::CreationDate => "creation_date",
        }
    }

    /// Resolves a sort key. `salary` is accepted for `salary.amount`.
    pub fn from_sort_key(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("salary") {
            return Some(EmployeeField::SalaryAmount);
        }
        EmployeeField::iter().find(|f| f.json_name().eq_ignore_ascii_case(key))
    }

    /// Fields every stored employee carries.
    pub fn mandatory() -> Vec<&'static str> {
        EmployeeField::iter().map(EmployeeField::json_name).collect()
    }

    pub fn all() -> Vec<&'static str> {
        Self::mandatory()
    }

    pub fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            EmployeeField::FirstName => a.first_name.cmp(&b.first_name),
            EmployeeField::LastName => a.last_name.cmp(&b.last_name),
            EmployeeField::MiddleName => a.middle_name.cmp(&b.middle_name),
            EmployeeField::EmployeeCode => a.employee_code.cmp(&b.employee_code),
            EmployeeField::EmployeeType => a
                .employee_type
                .to_string()
                .cmp(&b.employee_type.to_string()),
            EmployeeField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            EmployeeField::SalaryAmount => a.salary.amount.cmp(&b.salary.amount),
            EmployeeField::SalaryCurrency => a.salary.currency.cmp(&b.salary.currency),
            EmployeeField::CreationDate => a.creation_date.cmp(&b.creation_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_employee_type_parsing() {
        assert_eq!(
            "full-time".parse::<EmployeeType>().unwrap(),
            EmployeeType::FullTime
        );
        assert_eq!(
            "CONTRACT".parse::<EmployeeType>().unwrap(),
            EmployeeType::Contract
        );
        assert!("FULL_TIME".parse::<EmployeeType>().is_err());
        assert_eq!(EmployeeType::PartTime.to_string(), "PART-TIME");
    }

    #[test]
    fn test_employee_type_serde() {
        let json = serde_json::to_string(&EmployeeType::FullTime).unwrap();
        assert_eq!(json, "\"FULL-TIME\"");
        assert_eq!(
            EmployeeType::all_names(),
            vec!["FULL-TIME", "PART-TIME", "CONTRACT"]
        );
    }

    #[test]
    fn test_money_amount_accepts_number_or_string() {
        let from_str: Money =
            serde_json::from_str(r#"{"amount":"1200.50","currency":"EUR"}"#).unwrap();
        let from_num: Money = serde_json::from_str(r#"{"amount":1200.50,"currency":"eur"}"#).unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_str.amount, Decimal::new(120050, 2));
    }

    #[test]
    fn test_money_currency_defaults_to_usd() {
        let money: Money = serde_json::from_str(r#"{"amount":"10"}"#).unwrap();
        assert_eq!(money.currency, Currency::USD);
    }

    #[test]
    fn test_field_catalogue() {
        assert_eq!(EmployeeField::mandatory().len(), 9);
        assert_eq!(EmployeeField::all(), EmployeeField::mandatory());
        assert_eq!(EmployeeField::EmployeeCode.column(), "EMPLOYEE_ID");
        assert_eq!(
            EmployeeField::from_sort_key("salary"),
            Some(EmployeeField::SalaryAmount)
        );
        assert_eq!(
            EmployeeField::from_sort_key("FIRSTNAME"),
            Some(EmployeeField::FirstName)
        );
        assert_eq!(EmployeeField::from_sort_key("password"), None);
    }
}
