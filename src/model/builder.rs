//! Maps validated requests onto stored employees.

use crate::model::employee::{Employee, NewEmployee};
use crate::model::request::{EmployeeName, EmployeeProfile, EmployeeTypeChange, NewEmployeeDetails};
use crate::utils::random::random_digits;
use crate::utils::timezone::now_utc;

const CODE_DIGITS: usize = 4;

fn leading(value: &str, n: usize) -> String {
    value.chars().take(n).collect()
}

/// Letters taken from the name: two of the first name, one of the middle
/// name and two of the last name. Names of two characters or fewer
/// contribute nothing.
pub fn code_prefix(name: &EmployeeName) -> String {
    let mut prefix = String::new();
    if name.first_name.chars().count() > 2 {
        prefix.push_str(&leading(&name.first_name, 2));
    }
    if let Some(middle) = name.middle_name.as_deref().map(str::trim) {
        prefix.push_str(&leading(middle, 1));
    }
    if name.last_name.chars().count() > 2 {
        prefix.push_str(&leading(&name.last_name, 2));
    }
    prefix
}

pub fn generate_employee_code(name: &EmployeeName) -> String {
    format!("{}{}", code_prefix(name), random_digits(CODE_DIGITS)).to_uppercase()
}

pub fn to_new_employee(details: NewEmployeeDetails, employee_code: String) -> NewEmployee {
    let NewEmployeeDetails { email, profile } = details;
    NewEmployee {
        employee_code,
        first_name: profile.name.first_name,
        middle_name: profile.name.middle_name,
        last_name: profile.name.last_name,
        email,
        employee_type: profile.employee_type,
        salary: profile.salary,
        creation_date: now_utc(),
    }
}

pub fn apply_name(employee: &mut Employee, name: EmployeeName) {
    employee.first_name = name.first_name;
    employee.middle_name = name.middle_name;
    employee.last_name = name.last_name;
}

/// Replaces everything a full update may touch. Code, email and creation
/// date stay as stored.
pub fn apply_profile(employee: &mut Employee, profile: EmployeeProfile) {
    apply_name(employee, profile.name);
    employee.employee_type = profile.employee_type;
    employee.salary = profile.salary;
}

pub fn apply_type(employee: &mut Employee, change: EmployeeTypeChange) {
    employee.employee_type = change.employee_type;
    if let Some(salary) = change.salary {
        employee.salary = salary;
    }
}
