use crate::api::home::ZoneOffsetGroup;
use crate::error::ValidationError;
use crate::model::employee::{EmployeeType, Money};
use crate::model::request::{
    CreateEmployeeRequest, EmployeeNameRequest, EmployeeTypeRequest, SearchCriteria,
    UpdateEmployeeRequest,
};
use crate::model::response::EmployeeResponse;
use crate::response::{ApiError, AppResponse, ResponseMetadata};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Employee API",
        version = "1.0.0",
        description = r#"
## Payroll Employee Service

REST backend for employee payroll records.

### Key Features
- **Employees**
  - Create, read, replace, rename, retype and delete employees
  - Paginated and sortable listing (`page`, `size`, `sort`)
  - Search by name, email and employee type
- **Lookups**
  - Time zones, locales and ISO-4217 currencies

### Identifiers
Employees are addressed by their generated `empId`, for example `JODO1234`.
Lookups ignore case.

### Time zones
`employment_date` is rendered in the zone named by the `X-Timezone` header
or the `timezone` query parameter.

### Errors
Every failure returns the same envelope: `success`, `message`, `metadata`
and a `response` object carrying `traceId`, `code`, `status` and any field
level `errors`.
"#,
    ),
    paths(
        crate::api::home::index,
        crate::api::home::timezones,
        crate::api::home::timezone_offsets,
        crate::api::home::locales,
        crate::api::home::currencies,

        crate::api::employee::list_employees,
        crate::api::employee::search_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::update_employee_name,
        crate::api::employee::update_employee_type,
        crate::api::employee::delete_employee,
        crate::api::employee::count_employees,
        crate::api::employee::all_fields,
        crate::api::employee::mandatory_fields,
        crate::api::employee::count_mandatory_fields,
        crate::api::employee::count_all_fields
    ),
    components(
        schemas(
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            EmployeeNameRequest,
            EmployeeTypeRequest,
            SearchCriteria,
            EmployeeResponse,
            EmployeeType,
            Money,
            ZoneOffsetGroup,
            AppResponse,
            ApiError,
            ResponseMetadata,
            ValidationError
        )
    ),
    tags(
        (name = "Employee", description = "Employee payroll records"),
        (name = "Home", description = "Greeting and lookup tables"),
    )
)]
pub struct ApiDoc;
