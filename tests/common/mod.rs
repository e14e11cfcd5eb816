#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

/// App wired like `main` but on the in-memory store. Without a config,
/// rate limiting is off.
macro_rules! test_app {
    () => {
        test_app!(payroll::config::Config::default())
    };
    ($config:expr) => {{
        use actix_web::middleware::{NormalizePath, from_fn};
        use actix_web::web::Data;
        use payroll::middleware::error_envelope;
        use payroll::repository::InMemoryEmployeeRepository;
        use payroll::routes;
        use payroll::service::EmployeeService;

        let config = Data::new($config);
        let service = Data::new(EmployeeService::new(std::sync::Arc::new(
            InMemoryEmployeeRepository::new(),
        )));
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(config.clone())
                .app_data(service)
                .wrap(from_fn(error_envelope))
                .wrap(NormalizePath::trim())
                .configure(|cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

/// Status and JSON body (or `Null` when the body is not JSON).
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub fn employee_json(email: &str, first: &str, last: &str) -> Value {
    json!({
        "email": email,
        "firstName": first,
        "lastName": last,
        "employeeType": "FULL-TIME",
        "salary": { "amount": "4500.00", "currency": "USD" }
    })
}

pub fn post_employee(body: &Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(body)
}
