use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::model::builder;
use crate::model::employee::{Employee, EmployeeField};
use crate::model::request::{
    CreateEmployeeRequest, EmployeeName, EmployeeNameRequest, EmployeeTypeRequest, SearchCriteria,
    UpdateEmployeeRequest,
};
use crate::repository::EmployeeRepository;
use crate::utils::email_registry::EmailRegistry;
use crate::utils::paging::{Page, PageRequest};

/// Attempts at finding an unused employee code before giving up.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Business rules for employee records.
pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
    emails: EmailRegistry,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self {
            repository,
            emails: EmailRegistry::new(),
        }
    }

    fn require_code(employee_code: &str) -> AppResult<&str> {
        let code = employee_code.trim();
        if code.is_empty() {
            return Err(AppError::InvalidRequest(
                "Employee id must not be blank".to_string(),
            ));
        }
        Ok(code)
    }

    /// The filter rules out unseen addresses. A cached hit may be stale (another
    /// instance deleted the row, or warmup re-added it), so storage decides.
    async fn is_email_taken(&self, email: &str) -> AppResult<bool> {
        if !self.emails.might_exist(email) {
            return Ok(false);
        }
        let cached = self.emails.is_taken(email).await;
        let taken = self.repository.exists_by_email(email).await?;
        match (cached, taken) {
            (false, true) => self.emails.mark_taken(email).await,
            (true, false) => {
                debug!(email, "Dropping stale taken-email cache entry");
                self.emails.forget(email).await;
            }
            _ => {}
        }
        Ok(taken)
    }

    async fn unique_employee_code(&self, name: &EmployeeName) -> AppResult<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = builder::generate_employee_code(name);
            if !self.repository.exists_by_employee_code(&code).await? {
                return Ok(code);
            }
            warn!(employee_code = %code, "Generated employee code already in use, retrying");
        }
        Err(AppError::Internal(
            "could not generate a unique employee id".to_string(),
        ))
    }

    async fn load(&self, employee_code: &str) -> AppResult<Employee> {
        let code = Self::require_code(employee_code)?;
        self.repository
            .find_by_employee_code(code)
            .await?
            .ok_or_else(|| AppError::EmployeeNotFound {
                employee_id: code.to_string(),
            })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn save_employee(&self, request: &CreateEmployeeRequest) -> AppResult<Employee> {
        let details = request.validate()?;
        if self.is_email_taken(&details.email).await? {
            return Err(AppError::EmployeeAlreadyExists {
                email: details.email,
            });
        }

        let code = self.unique_employee_code(&details.profile.name).await?;
        let stored = self
            .repository
            .insert(builder::to_new_employee(details, code))
            .await?;
        self.emails.mark_taken(&stored.email).await;

        info!(employee_code = %stored.employee_code, "Employee created");
        Ok(stored)
    }

    #[instrument(skip(self, request))]
    pub async fn update_employee(
        &self,
        request: &UpdateEmployeeRequest,
        employee_code: &str,
    ) -> AppResult<Employee> {
        let profile = request.validate()?;
        let mut employee = self.load(employee_code).await?;
        builder::apply_profile(&mut employee, profile);
        self.repository.update(&employee).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_employee_name(
        &self,
        request: &EmployeeNameRequest,
        employee_code: &str,
    ) -> AppResult<Employee> {
        let name = request.validate()?;
        let mut employee = self.load(employee_code).await?;
        builder::apply_name(&mut employee, name);
        self.repository.update(&employee).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_employee_type(
        &self,
        request: &EmployeeTypeRequest,
        employee_code: &str,
    ) -> AppResult<Employee> {
        let change = request.validate()?;
        let mut employee = self.load(employee_code).await?;
        builder::apply_type(&mut employee, change);
        self.repository.update(&employee).await
    }

    #[instrument(skip(self))]
    pub async fn delete_employee(&self, employee_code: &str) -> AppResult<Employee> {
        let employee = self.load(employee_code).await?;
        if !self.repository.delete(&employee).await? {
            return Err(AppError::EmployeeNotFound {
                employee_id: employee.employee_code,
            });
        }
        self.emails.release(&employee.email).await;

        info!(employee_code = %employee.employee_code, "Employee deleted");
        Ok(employee)
    }

    pub async fn find_by_employee_code(&self, employee_code: &str) -> AppResult<Employee> {
        self.load(employee_code).await
    }

    pub async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Employee>> {
        self.repository.find_all(page).await
    }

    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        page: &PageRequest,
    ) -> AppResult<Page<Employee>> {
        let filter = criteria.validate()?;
        self.repository.search(&filter, page).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.repository.count().await
    }

    pub fn all_fields(&self) -> Vec<&'static str> {
        EmployeeField::all()
    }

    pub fn mandatory_fields(&self) -> Vec<&'static str> {
        EmployeeField::mandatory()
    }

    /// Loads every stored email into the registry, `batch_size` at a time.
    #[instrument(skip(self))]
    pub async fn warmup_email_index(&self, batch_size: u32) -> AppResult<u64> {
        let batch_size = batch_size.max(1);
        let mut offset = 0u64;
        loop {
            let batch = self.repository.emails(offset, batch_size).await?;
            let fetched = batch.len() as u64;
            self.emails.mark_batch(&batch).await;
            offset += fetched;
            if fetched < u64::from(batch_size) {
                break;
            }
        }

        info!(total = offset, "Email index warmup complete");
        Ok(offset)
    }
}
