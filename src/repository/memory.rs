use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{EmployeeRepository, matches_filter};
use crate::error::{AppError, AppResult};
use crate::model::employee::{Employee, NewEmployee};
use crate::model::request::EmployeeFilter;
use crate::utils::paging::{Direction, Page, PageRequest};

#[derive(Default)]
struct State {
    next_id: u64,
    rows: BTreeMap<u64, Employee>,
}

/// Process-local store with the same semantics as the MySQL one.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    state: RwLock<State>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| AppError::Internal("employee store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| AppError::Internal("employee store lock poisoned".to_string()))
    }

    fn page_of<'a>(
        rows: impl Iterator<Item = &'a Employee>,
        page: &PageRequest,
    ) -> Page<Employee> {
        let mut matched: Vec<&Employee> = rows.collect();
        matched.sort_by(|a, b| {
            page.sort
                .iter()
                .map(|order| {
                    let ordering = order.property.compare(a, b);
                    match order.direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.id.cmp(&b.id))
        });

        let total = matched.len() as u64;
        let content = matched
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.size as usize)
            .cloned()
            .collect();
        Page::new(content, page, total)
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn count(&self) -> AppResult<u64> {
        Ok(self.read()?.rows.len() as u64)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .read()?
            .rows
            .values()
            .any(|e| e.email.eq_ignore_ascii_case(email)))
    }

    async fn exists_by_employee_code(&self, employee_code: &str) -> AppResult<bool> {
        Ok(self.find_by_employee_code(employee_code).await?.is_some())
    }

    async fn find_by_employee_code(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|e| e.employee_code.eq_ignore_ascii_case(employee_code))
            .cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Employee>> {
        let state = self.read()?;
        Ok(Self::page_of(state.rows.values(), page))
    }

    async fn search(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest,
    ) -> AppResult<Page<Employee>> {
        let state = self.read()?;
        Ok(Self::page_of(
            state.rows.values().filter(|e| matches_filter(e, filter)),
            page,
        ))
    }

    async fn insert(&self, employee: NewEmployee) -> AppResult<Employee> {
        let mut state = self.write()?;
        if state
            .rows
            .values()
            .any(|e| e.email.eq_ignore_ascii_case(&employee.email))
        {
            return Err(AppError::EmployeeAlreadyExists {
                email: employee.email,
            });
        }
        if state
            .rows
            .values()
            .any(|e| e.employee_code.eq_ignore_ascii_case(&employee.employee_code))
        {
            return Err(AppError::Internal(format!(
                "duplicate employee code {}",
                employee.employee_code
            )));
        }

        state.next_id += 1;
        let stored = employee.into_employee(state.next_id);
        state.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        let mut state = self.write()?;
        let current = state
            .rows
            .get_mut(&employee.id)
            .ok_or_else(|| AppError::EmployeeNotFound {
                employee_id: employee.employee_code.clone(),
            })?;
        if current.version != employee.version {
            return Err(AppError::ConcurrentModification {
                employee_id: employee.employee_code.clone(),
            });
        }

        let mut updated = employee.clone();
        updated.version += 1;
        *current = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, employee: &Employee) -> AppResult<bool> {
        Ok(self.write()?.rows.remove(&employee.id).is_some())
    }

    async fn emails(&self, offset: u64, limit: u32) -> AppResult<Vec<String>> {
        Ok(self
            .read()?
            .rows
            .values()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .map(|e| e.email.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::{EmployeeField, EmployeeType, Money};
    use crate::utils::currency::Currency;
    use crate::utils::paging::SortOrder;
    use crate::utils::timezone::now_utc;
    use rust_decimal::Decimal;

    fn new_employee(code: &str, first: &str, email: &str, amount: i64) -> NewEmployee {
        NewEmployee {
            employee_code: code.into(),
            first_name: first.into(),
            middle_name: None,
            last_name: "Doe".into(),
            email: email.into(),
            employee_type: EmployeeType::FullTime,
            salary: Money::new(Decimal::new(amount, 0), Currency::USD),
            creation_date: now_utc(),
        }
    }

    #[actix_web::test]
    async fn test_insert_assigns_ids_and_rejects_duplicate_email() {
        let repo = InMemoryEmployeeRepository::new();
        let first = repo
            .insert(new_employee("JODO0001", "John", "john@example.com", 10))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.version, 0);

        let err = repo
            .insert(new_employee("JODO0002", "Jo", "JOHN@example.com", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmployeeAlreadyExists { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_find_by_code_is_case_insensitive() {
        let repo = InMemoryEmployeeRepository::new();
        repo.insert(new_employee("JODO0001", "John", "john@example.com", 10))
            .await
            .unwrap();
        assert!(repo.find_by_employee_code("jodo0001").await.unwrap().is_some());
        assert!(repo.exists_by_employee_code("JoDo0001").await.unwrap());
        assert!(repo.exists_by_email("John@Example.com").await.unwrap());
        assert!(repo.find_by_employee_code("none").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_update_checks_version() {
        let repo = InMemoryEmployeeRepository::new();
        let mut stored = repo
            .insert(new_employee("JODO0001", "John", "john@example.com", 10))
            .await
            .unwrap();
        let stale = stored.clone();

        stored.first_name = "Johnny".into();
        let updated = repo.update(&stored).await.unwrap();
        assert_eq!(updated.version, 1);

        let err = repo.update(&stale).await.unwrap_err();
        assert!(matches!(err, AppError::ConcurrentModification { .. }));
    }

    #[actix_web::test]
    async fn test_paging_and_sorting() {
        let repo = InMemoryEmployeeRepository::new();
        for (i, (first, amount)) in [("Carol", 30), ("Alice", 10), ("Bob", 20)]
            .into_iter()
            .enumerate()
        {
            repo.insert(new_employee(
                &format!("CODE000{}", i),
                first,
                &format!("{}@example.com", first.to_lowercase()),
                amount,
            ))
            .await
            .unwrap();
        }

        let request = PageRequest {
            page: 0,
            size: 2,
            sort: vec![SortOrder {
                property: EmployeeField::SalaryAmount,
                direction: Direction::Desc,
            }],
        };
        let page = repo.find_all(&request).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Bob"]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);

        let filter = EmployeeFilter {
            name: Some("ali".into()),
            ..Default::default()
        };
        let found = repo.search(&filter, &PageRequest::default()).await.unwrap();
        assert_eq!(found.content.len(), 1);
        assert_eq!(found.content[0].first_name, "Alice");
    }

    #[actix_web::test]
    async fn test_delete_and_emails() {
        let repo = InMemoryEmployeeRepository::new();
        let stored = repo
            .insert(new_employee("JODO0001", "John", "john@example.com", 10))
            .await
            .unwrap();
        repo.insert(new_employee("JADO0001", "Jane", "jane@example.com", 10))
            .await
            .unwrap();

        assert_eq!(repo.emails(0, 10).await.unwrap().len(), 2);
        assert_eq!(repo.emails(1, 10).await.unwrap(), vec!["jane@example.com"]);

        assert!(repo.delete(&stored).await.unwrap());
        assert!(!repo.delete(&stored).await.unwrap());
    }
}
