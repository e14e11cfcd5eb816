use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, error};

use super::EmployeeRepository;
use crate::error::{AppError, AppResult};
use crate::model::employee::{Employee, EmployeeType, Money, NewEmployee};
use crate::model::request::EmployeeFilter;
use crate::utils::currency::Currency;
use crate::utils::paging::{Page, PageRequest};

const SELECT_EMPLOYEE: &str = r#"
    SELECT
        ID AS id,
        EMPLOYEE_ID AS employee_code,
        FIRST_NAME AS first_name,
        MIDDLE_NAME AS middle_name,
        LAST_NAME AS last_name,
        EMAIL AS email,
        EMPLOYEE_TYPE AS employee_type,
        sal_amount,
        sal_currency,
        creation_date,
        version
    FROM employee
"#;

const EMAIL_UNIQUE_KEY: &str = "uk_employee_email";

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: u64,
    employee_code: String,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email: String,
    employee_type: String,
    sal_amount: Decimal,
    sal_currency: String,
    creation_date: NaiveDateTime,
    version: u32,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = AppError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let employee_type: EmployeeType = row.employee_type.parse().map_err(|_| {
            AppError::Internal(format!(
                "stored employee {} has unknown type {}",
                row.employee_code, row.employee_type
            ))
        })?;
        let currency = Currency::try_from(row.sal_currency).map_err(|e| {
            AppError::Internal(format!(
                "stored employee {} has {}",
                row.employee_code, e
            ))
        })?;

        Ok(Employee {
            id: row.id,
            employee_code: row.employee_code,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            email: row.email,
            employee_type,
            salary: Money::new(row.sal_amount, currency),
            creation_date: row.creation_date.and_utc(),
            version: row.version,
        })
    }
}

fn to_employees(rows: Vec<EmployeeRow>) -> AppResult<Vec<Employee>> {
    rows.into_iter().map(Employee::try_from).collect()
}

/// ORDER BY built only from catalogue columns, with the id as tie breaker.
fn order_by(page: &PageRequest) -> String {
    let mut columns: Vec<String> = page
        .sort
        .iter()
        .map(|order| format!("{} {}", order.property.column(), order.direction.as_sql()))
        .collect();
    columns.push("ID ASC".to_string());
    format!("ORDER BY {}", columns.join(", "))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// WHERE clause and bindings for a search, in placeholder order.
fn where_clause(filter: &EmployeeFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if let Some(name) = &filter.name {
        conditions.push("(FIRST_NAME LIKE ? OR MIDDLE_NAME LIKE ? OR LAST_NAME LIKE ?)");
        let like = escape_like(name);
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }
    if let Some(email) = &filter.email {
        conditions.push("EMAIL LIKE ?");
        bindings.push(escape_like(email));
    }
    if let Some(employee_type) = filter.employee_type {
        conditions.push("EMPLOYEE_TYPE = ?");
        bindings.push(employee_type.to_string());
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, bindings)
}

/// Unique key violations on the email index become conflicts.
fn map_write_error(e: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() && db.message().contains(EMAIL_UNIQUE_KEY) {
            return AppError::EmployeeAlreadyExists {
                email: email.to_string(),
            };
        }
    }
    e.into()
}

pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        where_sql: &str,
        bindings: &[String],
        page: &PageRequest,
    ) -> AppResult<Page<Employee>> {
        let count_sql = format!("SELECT COUNT(*) FROM employee {}", where_sql);
        debug!(sql = %count_sql, bindings = ?bindings, "Counting employees");

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for b in bindings {
            count_query = count_query.bind(b);
        }
        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            error!(error = %e, sql = %count_sql, "Failed to count employees");
            AppError::from(e)
        })?;

        let data_sql = format!(
            "{} {} {} LIMIT ? OFFSET ?",
            SELECT_EMPLOYEE,
            where_sql,
            order_by(page)
        );
        debug!(sql = %data_sql, page = page.page, size = page.size, "Fetching employees");

        let mut data_query = sqlx::query_as::<_, EmployeeRow>(&data_sql);
        for b in bindings {
            data_query = data_query.bind(b);
        }
        let rows = data_query
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, sql = %data_sql, "Failed to fetch employees");
                AppError::from(e)
            })?;

        Ok(Page::new(
            to_employees(rows)?,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn count(&self) -> AppResult<u64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM employee WHERE EMAIL = ?)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    async fn exists_by_employee_code(&self, employee_code: &str) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM employee WHERE EMPLOYEE_ID = ?)",
        )
        .bind(employee_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    async fn find_by_employee_code(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        let sql = format!("{} WHERE EMPLOYEE_ID = ?", SELECT_EMPLOYEE);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(employee_code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_code, "Failed to fetch employee");
                AppError::from(e)
            })?;
        row.map(Employee::try_from).transpose()
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Employee>> {
        self.fetch_page("", &[], page).await
    }

    async fn search(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest,
    ) -> AppResult<Page<Employee>> {
        let (where_sql, bindings) = where_clause(filter);
        self.fetch_page(&where_sql, &bindings, page).await
    }

    async fn insert(&self, employee: NewEmployee) -> AppResult<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employee
            (EMPLOYEE_ID, FIRST_NAME, MIDDLE_NAME, LAST_NAME, EMAIL, EMPLOYEE_TYPE,
             sal_amount, sal_currency, creation_date, version)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&employee.employee_code)
        .bind(&employee.first_name)
        .bind(&employee.middle_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.employee_type.to_string())
        .bind(employee.salary.amount)
        .bind(employee.salary.currency.to_string())
        .bind(employee.creation_date.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &employee.email))?;

        Ok(employee.into_employee(result.last_insert_id()))
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        let result = sqlx::query(
            r#"
            UPDATE employee
            SET FIRST_NAME = ?, MIDDLE_NAME = ?, LAST_NAME = ?, EMPLOYEE_TYPE = ?,
                sal_amount = ?, sal_currency = ?, version = version + 1
            WHERE ID = ? AND version = ?
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.middle_name)
        .bind(&employee.last_name)
        .bind(employee.employee_type.to_string())
        .bind(employee.salary.amount)
        .bind(employee.salary.currency.to_string())
        .bind(employee.id)
        .bind(employee.version)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &employee.email))?;

        if result.rows_affected() == 0 {
            return Err(AppError::ConcurrentModification {
                employee_id: employee.employee_code.clone(),
            });
        }

        let mut updated = employee.clone();
        updated.version += 1;
        Ok(updated)
    }

    async fn delete(&self, employee: &Employee) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employee WHERE ID = ?")
            .bind(employee.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = employee.id, "Failed to delete employee");
                AppError::from(e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn emails(&self, offset: u64, limit: u32) -> AppResult<Vec<String>> {
        let emails = sqlx::query_scalar::<_, String>(
            "SELECT EMAIL FROM employee ORDER BY ID LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(emails)
    }
}
