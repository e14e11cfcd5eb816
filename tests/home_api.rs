#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::send;

#[actix_web::test]
async fn index_greets() {
    let app = test_app!();
    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        test::read_body(res).await,
        payroll::api::home::GREETING.as_bytes()
    );
}

#[actix_web::test]
async fn timezones_are_sorted_ids() {
    let app = test_app!();
    let (status, body) = send(&app, test::TestRequest::get().uri("/timezones").to_request()).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(ids.contains(&"America/New_York"));
    assert!(ids.windows(2).all(|w| w[0] <= w[1]));
}

#[actix_web::test]
async fn timezone_offsets_are_grouped() {
    let app = test_app!();
    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/timezones/offsets").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let groups = body.as_array().unwrap();
    let utc = groups
        .iter()
        .find(|g| g["offset"] == "+00:00")
        .expect("a zero offset group");
    assert!(
        utc["zones"]
            .as_array()
            .unwrap()
            .iter()
            .any(|z| z == "UTC")
    );
}

#[actix_web::test]
async fn locales_and_currencies() {
    let app = test_app!();

    let (status, locales) = send(&app, test::TestRequest::get().uri("/locales").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(locales["en_US"], "English");

    let (status, currencies) =
        send(&app, test::TestRequest::get().uri("/currencies").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    let codes = currencies.as_array().unwrap();
    assert!(codes.iter().any(|c| c == "USD"));
    assert!(codes.iter().any(|c| c == "NGN"));
}
