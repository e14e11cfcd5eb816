use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use tracing::debug;

use crate::api::context::ClientContext;
use crate::error::AppResult;
use crate::model::request::{
    CreateEmployeeRequest, EmployeeNameRequest, EmployeeTypeRequest, SearchCriteria,
    UpdateEmployeeRequest,
};
use crate::model::response::EmployeeResponse;
use crate::service::EmployeeService;
use crate::utils::paging::{Page, PageRequest};

type Service = web::Data<EmployeeService>;

/// 404 only when nothing matches at all; a page past the end is still 200.
fn page_response(page: Page<EmployeeResponse>) -> HttpResponse {
    if page.total_elements == 0 {
        HttpResponse::NotFound().json(page)
    } else {
        HttpResponse::Ok().json(page)
    }
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(
        ("page", Query, description = "Zero based page number, defaults to 0"),
        ("size", Query, description = "Page size between 1 and 100, defaults to 20"),
        ("sort", Query, description = "Sort expression such as `lastName,desc firstName`. Also read from sort_by, sortBy and sortby"),
        ("X-Timezone", Header, description = "Time zone for employment_date")
    ),
    responses(
        (status = 200, description = "Page of employees", body = Object, example = json!({
            "content": [{
                "empId": "JODO1234",
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "empType": "FULL-TIME",
                "salary": { "amount": "4500.00", "currency": "USD" },
                "employment_date": "2024-03-01 09:15:00AM -05:00"
            }],
            "totalElements": 1,
            "totalPages": 1,
            "page": 0,
            "size": 20,
            "sort": ["empId,ASC"]
        })),
        (status = 404, description = "No employees stored", body = Object),
        (status = 400, description = "Unknown sort property", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: Service,
    ctx: ClientContext,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let page_request = PageRequest::from_query(&query)?;
    debug!(page = page_request.page, size = page_request.size, "Listing employees");

    let page = service.find_all(&page_request).await?;
    Ok(page_response(
        page.map(|e| EmployeeResponse::new(&e, ctx.zone)),
    ))
}

/// Search employees
#[utoipa::path(
    post,
    path = "/api/v1/employees/search",
    request_body = SearchCriteria,
    params(
        ("page", Query, description = "Zero based page number"),
        ("size", Query, description = "Page size"),
        ("sort", Query, description = "Sort expression")
    ),
    responses(
        (status = 200, description = "Page of matching employees", body = Object),
        (status = 404, description = "No matching employees", body = Object),
        (status = 400, description = "Invalid criteria", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn search_employees(
    service: Service,
    ctx: ClientContext,
    query: web::Query<HashMap<String, String>>,
    criteria: web::Json<SearchCriteria>,
) -> AppResult<HttpResponse> {
    let page_request = PageRequest::from_query(&query)?;
    let page = service.search(&criteria, &page_request).await?;
    Ok(page_response(
        page.map(|e| EmployeeResponse::new(&e, ctx.zone)),
    ))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid payload", body = AppResponse),
        (status = 409, description = "Email already registered", body = AppResponse),
        (status = 415, description = "Body is not JSON", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    req: HttpRequest,
    service: Service,
    ctx: ClientContext,
    payload: web::Json<CreateEmployeeRequest>,
) -> AppResult<HttpResponse> {
    let employee = service.save_employee(&payload).await?;
    let location = format!(
        "{}/{}",
        req.path().trim_end_matches('/'),
        employee.employee_code
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(EmployeeResponse::new(&employee, ctx.zone)))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/api/v1/employees/{emp_id}",
    params(
        ("emp_id", Path, description = "Employee id, case-insensitive"),
        ("X-Timezone", Header, description = "Time zone for employment_date")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: Service,
    ctx: ClientContext,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let employee = service.find_by_employee_code(&path).await?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::new(&employee, ctx.zone)))
}

/// Replace an employee's details
#[utoipa::path(
    put,
    path = "/api/v1/employees/{emp_id}",
    params(
        ("emp_id", Path, description = "Employee id")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Invalid payload", body = AppResponse),
        (status = 404, description = "Employee not found", body = AppResponse),
        (status = 409, description = "Modified concurrently", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    service: Service,
    ctx: ClientContext,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployeeRequest>,
) -> AppResult<HttpResponse> {
    let employee = service.update_employee(&payload, &path).await?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::new(&employee, ctx.zone)))
}

/// Rename an employee
#[utoipa::path(
    patch,
    path = "/api/v1/employees/{emp_id}/name",
    params(
        ("emp_id", Path, description = "Employee id")
    ),
    request_body = EmployeeNameRequest,
    responses(
        (status = 200, description = "Name updated", body = String, example = json!("Successfully updated Employee name to: Jane Roe")),
        (status = 400, description = "Invalid payload", body = AppResponse),
        (status = 404, description = "Employee not found", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn update_employee_name(
    service: Service,
    path: web::Path<String>,
    payload: web::Json<EmployeeNameRequest>,
) -> AppResult<HttpResponse> {
    let employee = service.update_employee_name(&payload, &path).await?;
    Ok(HttpResponse::Ok().json(format!(
        "Successfully updated Employee name to: {}",
        employee.full_name()
    )))
}

/// Change an employee's type
#[utoipa::path(
    patch,
    path = "/api/v1/employees/{emp_id}/type",
    params(
        ("emp_id", Path, description = "Employee id")
    ),
    request_body = EmployeeTypeRequest,
    responses(
        (status = 200, description = "Type updated", body = String, example = json!("Successfully updated Employee type to: CONTRACT")),
        (status = 400, description = "Invalid payload", body = AppResponse),
        (status = 404, description = "Employee not found", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn update_employee_type(
    service: Service,
    path: web::Path<String>,
    payload: web::Json<EmployeeTypeRequest>,
) -> AppResult<HttpResponse> {
    let employee = service.update_employee_type(&payload, &path).await?;
    Ok(HttpResponse::Ok().json(format!(
        "Successfully updated Employee type to: {}",
        employee.employee_type
    )))
}

/// Delete employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{emp_id}",
    params(
        ("emp_id", Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = String, example = json!("Successfully deleted Employee with id: JODO1234")),
        (status = 404, description = "Employee not found", body = AppResponse)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(service: Service, path: web::Path<String>) -> AppResult<HttpResponse> {
    let employee = service.delete_employee(&path).await?;
    Ok(HttpResponse::Ok().json(format!(
        "Successfully deleted Employee with id: {}",
        employee.employee_code
    )))
}

/// Number of stored employees
#[utoipa::path(
    get,
    path = "/api/v1/employees/count",
    responses(
        (status = 200, description = "Employee count", body = String, example = json!("All employee Count: 42"))
    ),
    tag = "Employee"
)]
pub async fn count_employees(service: Service) -> AppResult<HttpResponse> {
    let count = service.count().await?;
    Ok(HttpResponse::Ok().json(format!("All employee Count: {}", count)))
}

/// Every field of an employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/all-fields",
    responses(
        (status = 200, description = "Field names", body = Vec<String>)
    ),
    tag = "Employee"
)]
pub async fn all_fields(service: Service) -> HttpResponse {
    HttpResponse::Ok().json(service.all_fields())
}

/// Fields required on every employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/mandatory-fields",
    responses(
        (status = 200, description = "Field names", body = Vec<String>)
    ),
    tag = "Employee"
)]
pub async fn mandatory_fields(service: Service) -> HttpResponse {
    HttpResponse::Ok().json(service.mandatory_fields())
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/count-mandatory-fields",
    responses(
        (status = 200, description = "Mandatory field count", body = String, example = json!("Mandatory fields Count: 9"))
    ),
    tag = "Employee"
)]
pub async fn count_mandatory_fields(service: Service) -> HttpResponse {
    HttpResponse::Ok().json(format!(
        "Mandatory fields Count: {}",
        service.mandatory_fields().len()
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/count-all-fields",
    responses(
        (status = 200, description = "Field count", body = String, example = json!("All fields Count: 9"))
    ),
    tag = "Employee"
)]
pub async fn count_all_fields(service: Service) -> HttpResponse {
    HttpResponse::Ok().json(format!("All fields Count: {}", service.all_fields().len()))
}
