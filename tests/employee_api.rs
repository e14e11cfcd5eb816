//! HTTP-level tests of the employee endpoints against the in-memory store.

#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use common::{employee_json, post_employee, send};

fn error_code(body: &Value) -> &str {
    body["response"]["code"].as_str().unwrap_or_default()
}

#[actix_web::test]
async fn create_then_fetch_round_trips_fields() {
    let app = test_app!();

    let res = test::call_service(
        &app,
        post_employee(&employee_json("john.doe@example.com", "John", "Doe")).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap()
        .to_string();
    let created: Value = test::read_body_json(res).await;

    let emp_id = created["empId"].as_str().unwrap();
    assert!(emp_id.starts_with("JODO"));
    assert_eq!(location, format!("/api/v1/employees/{}", emp_id));
    assert_eq!(created["firstName"], "John");
    assert_eq!(created["lastName"], "Doe");
    assert_eq!(created["email"], "john.doe@example.com");
    assert_eq!(created["empType"], "FULL-TIME");
    assert_eq!(created["salary"]["amount"], "4500.00");
    assert_eq!(created["salary"]["currency"], "USD");
    assert!(created.get("id").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/employees/{}", emp_id.to_lowercase()))
        .to_request();
    let (status, fetched) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = test_app!();
    let body = employee_json("jane@example.com", "Jane", "Roe");

    let (status, _) = send(&app, post_employee(&body).to_request()).await;
    assert_eq!(status, StatusCode::CREATED);

    let duplicate = employee_json("JANE@example.com", "Janet", "Rowe");
    let (status, body) = send(&app, post_employee(&duplicate).to_request()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "ERROR!");
    assert_eq!(error_code(&body), "EMP-EXIST-001");
    assert_eq!(body["response"]["statusCode"], 409);
}

#[actix_web::test]
async fn unknown_employee_is_not_found() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/employees/NOPE0000")
        .insert_header(("X-B3-TraceId", "trace-abc"))
        .to_request();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "EMP-NF-001");
    assert_eq!(body["response"]["status"], "NOT_FOUND");
    assert_eq!(body["response"]["path"], "/api/v1/employees/NOPE0000");
    assert_eq!(body["response"]["method"], "GET");
    assert_eq!(body["response"]["traceId"], "trace-abc");
    assert_eq!(body["metadata"]["apiVersion"], "v1");
}

#[actix_web::test]
async fn invalid_payload_lists_every_violation() {
    let app = test_app!();
    let body = json!({
        "email": "not-an-email",
        "firstName": "",
        "lastName": "   ",
        "employeeType": "INTERN",
        "salary": { "amount": "-1", "currency": "USD" }
    });

    let (status, body) = send(&app, post_employee(&body).to_request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INV-DATA-001");

    let fields: Vec<&str> = body["response"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(
        fields,
        vec!["email", "firstName", "lastName", "employeeType", "salary.amount"]
    );
}

#[actix_web::test]
async fn wrong_content_type_is_unsupported() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("email=john@example.com")
        .to_request();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error_code(&body), "HTTP-ERR-0002");
}

#[actix_web::test]
async fn malformed_and_mistyped_json_are_bad_requests() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "HTTP-ERR-0005");

    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(json!({ "email": "a@example.com", "firstName": 42 }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "HTTP-ERR-0006");
}

#[actix_web::test]
async fn full_update_preserves_identity() {
    let app = test_app!();
    let (_, created) = send(
        &app,
        post_employee(&employee_json("sam@example.com", "Samuel", "Adams")).to_request(),
    )
    .await;
    let emp_id = created["empId"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/employees/{}", emp_id))
        .set_json(json!({
            "firstName": "Samantha",
            "middleName": "J",
            "lastName": "Adamson",
            "employeeType": "contract",
            "salary": { "amount": 6100, "currency": "eur" }
        }))
        .to_request();
    let (status, updated) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(updated["firstName"], "Samantha");
    assert_eq!(updated["middleName"], "J");
    assert_eq!(updated["lastName"], "Adamson");
    assert_eq!(updated["empType"], "CONTRACT");
    assert_eq!(updated["salary"]["currency"], "EUR");
    assert_eq!(updated["empId"], created["empId"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["employment_date"], created["employment_date"]);
}

#[actix_web::test]
async fn partial_updates_return_messages() {
    let app = test_app!();
    let (_, created) = send(
        &app,
        post_employee(&employee_json("ada@example.com", "Ada", "Lovelace")).to_request(),
    )
    .await;
    let emp_id = created["empId"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/employees/{}/name", emp_id))
        .set_json(json!({ "firstName": "Augusta", "middleName": "Ada", "lastName": "King" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Successfully updated Employee name to: Augusta Ada King");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/employees/{}/type", emp_id))
        .set_json(json!({ "employeeType": "part-time" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Successfully updated Employee type to: PART-TIME");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/employees/{}", emp_id))
        .to_request();
    let (_, fetched) = send(&app, req).await;
    assert_eq!(fetched["firstName"], "Augusta");
    assert_eq!(fetched["empType"], "PART-TIME");
    assert_eq!(fetched["salary"], created["salary"]);
}

#[actix_web::test]
async fn delete_then_lookup_is_not_found() {
    let app = test_app!();
    let (_, created) = send(
        &app,
        post_employee(&employee_json("grace@example.com", "Grace", "Hopper")).to_request(),
    )
    .await;
    let emp_id = created["empId"].as_str().unwrap();
    let uri = format!("/api/v1/employees/{}", emp_id);

    let (status, body) = send(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        Value::String(format!("Successfully deleted Employee with id: {}", emp_id))
    );

    let (status, body) = send(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "EMP-NF-001");

    let (status, _) = send(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn listing_pages_and_sorts() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/employees").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["totalElements"], 0);

    for (email, first, last) in [
        ("carol@example.com", "Carol", "Smith"),
        ("alice@example.com", "Alice", "Jones"),
        ("bob@example.com", "Bobby", "Brown"),
    ] {
        let (status, _) = send(&app, post_employee(&employee_json(email, first, last)).to_request()).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/employees?page=0&size=2&sort=firstName,desc")
        .to_request();
    let (status, page) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["size"], 2);
    assert_eq!(page["sort"], json!(["firstName,DESC"]));
    let names: Vec<&str> = page["content"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["firstName"].as_str())
        .collect();
    assert_eq!(names, vec!["Carol", "Bobby"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/employees?page=1&size=2&sortBy=firstName.desc")
        .to_request();
    let (_, page) = send(&app, req).await;
    assert_eq!(page["content"][0]["firstName"], "Alice");

    let req = test::TestRequest::get()
        .uri("/api/v1/employees?page=3")
        .to_request();
    let (status, page) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["content"], json!([]));

    let req = test::TestRequest::get()
        .uri("/api/v1/employees?sort=password")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD-REQ-001");
}

#[actix_web::test]
async fn search_filters_by_criteria() {
    let app = test_app!();
    for (email, first, last) in [
        ("carol@corp.io", "Carol", "Smith"),
        ("alice@example.com", "Alice", "Smithers"),
        ("bob@example.com", "Bobby", "Brown"),
    ] {
        send(&app, post_employee(&employee_json(email, first, last)).to_request()).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/search?sort=email")
        .set_json(json!({ "name": "smith", "email": "example" }))
        .to_request();
    let (status, page) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["email"], "alice@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/search")
        .set_json(json!({ "employeeType": "CONTRACT" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn count_and_field_endpoints() {
    let app = test_app!();
    send(
        &app,
        post_employee(&employee_json("one@example.com", "First", "Person")).to_request(),
    )
    .await;

    let get = |uri: &str| test::TestRequest::get().uri(uri).to_request();

    let (_, body) = send(&app, get("/api/v1/employees/count")).await;
    assert_eq!(body, "All employee Count: 1");

    let (_, body) = send(&app, get("/api/v1/employees/all-fields")).await;
    let fields = body.as_array().unwrap();
    assert_eq!(fields.len(), 9);
    assert!(fields.contains(&json!("empId")));
    assert!(fields.contains(&json!("employment_date")));

    let (_, body) = send(&app, get("/api/v1/employees/mandatory-fields")).await;
    assert_eq!(body.as_array().unwrap().len(), 9);

    let (_, body) = send(&app, get("/api/v1/employees/count-mandatory-fields")).await;
    assert_eq!(body, "Mandatory fields Count: 9");

    let (_, body) = send(&app, get("/api/v1/employees/count-all-fields")).await;
    assert_eq!(body, "All fields Count: 9");
}

#[actix_web::test]
async fn employment_date_follows_requested_zone() {
    let app = test_app!();
    let (_, created) = send(
        &app,
        post_employee(&employee_json("tz@example.com", "Tomas", "Zone")).to_request(),
    )
    .await;
    let uri = format!("/api/v1/employees/{}", created["empId"].as_str().unwrap());

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("X-Timezone", "Asia/Tokyo"))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert!(body["employment_date"].as_str().unwrap().ends_with("+09:00"));

    let req = test::TestRequest::get()
        .uri(&format!("{}?timezone=UTC", uri))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert!(body["employment_date"].as_str().unwrap().ends_with(" Z"));
}

#[actix_web::test]
async fn unknown_route_uses_error_envelope() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/v1/nothing-here").to_request();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "GEN-NF-001");
    assert_eq!(body["response"]["path"], "/api/v1/nothing-here");
}

#[actix_web::test]
async fn rate_limited_requests_use_error_envelope() {
    let config = payroll::config::Config {
        rate_api_per_min: 1,
        ..Default::default()
    };
    let app = test_app!(config);
    let peer: std::net::SocketAddr = "10.0.0.7:40000".parse().unwrap();
    let count = || {
        test::TestRequest::get()
            .uri("/api/v1/employees/count")
            .peer_addr(peer)
            .to_request()
    };

    let (status, _) = send(&app, count()).await;
    assert_eq!(status, StatusCode::OK);

    let res = test::call_service(&app, count()).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(res.headers().contains_key("x-ratelimit-after"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(error_code(&body), "HTTP-ERR-0429");
    assert_eq!(body["response"]["path"], "/api/v1/employees/count");
}
