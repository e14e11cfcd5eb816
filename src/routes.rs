use crate::{
    api::{employee, home},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpRequest, HttpResponse,
    error::{JsonPayloadError, PathError, QueryPayloadError},
    middleware::Condition,
    web,
};

/// Per-peer limiter allowing `requests_per_min` with the same burst.
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / u64::from(requests_per_min)).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_else(GovernorConfig::default);
    Governor::new(&cfg)
}

/// Maps body extraction failures onto the application's error codes.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_error = match &err {
        JsonPayloadError::ContentType => {
            AppError::MediaTypeNotSupported("Content type must be application/json".to_string())
        }
        JsonPayloadError::Deserialize(e) if e.is_syntax() || e.is_eof() => {
            AppError::JsonParse(e.to_string())
        }
        JsonPayloadError::Deserialize(e) => AppError::MessageNotReadable(e.to_string()),
        _ => AppError::MessageNotReadable(err.to_string()),
    };
    app_error.into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidRequest(err.to_string()).into()
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::ResourceNotFound(format!(
        "{} {}",
        req.method(),
        req.path()
    )))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    // Public lookups
    cfg.service(home::index)
        .service(home::timezones)
        .service(home::timezone_offsets)
        .service(home::locales)
        .service(home::currencies);

    let limiter = Condition::new(
        config.rate_api_per_min > 0,
        build_limiter(config.rate_api_per_min),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // fixed paths before /{emp_id}
                    .service(
                        web::resource("/search").route(web::post().to(employee::search_employees)),
                    )
                    .service(
                        web::resource("/count").route(web::get().to(employee::count_employees)),
                    )
                    .service(
                        web::resource("/all-fields").route(web::get().to(employee::all_fields)),
                    )
                    .service(
                        web::resource("/mandatory-fields")
                            .route(web::get().to(employee::mandatory_fields)),
                    )
                    .service(
                        web::resource("/count-mandatory-fields")
                            .route(web::get().to(employee::count_mandatory_fields)),
                    )
                    .service(
                        web::resource("/count-all-fields")
                            .route(web::get().to(employee::count_all_fields)),
                    )
                    // /employees/{emp_id}
                    .service(
                        web::resource("/{emp_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    .service(
                        web::resource("/{emp_id}/name")
                            .route(web::patch().to(employee::update_employee_name)),
                    )
                    .service(
                        web::resource("/{emp_id}/type")
                            .route(web::patch().to(employee::update_employee_type)),
                    ),
            ),
    );

    cfg.default_service(web::to(not_found));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{ResponseError, http::StatusCode, test::TestRequest};

    fn status_of(err: actix_web::Error) -> StatusCode {
        err.as_response_error().status_code()
    }

    #[test]
    fn test_json_errors_map_to_app_errors() {
        let req = TestRequest::default().to_http_request();

        let err = json_error(JsonPayloadError::ContentType, &req);
        assert_eq!(status_of(err), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let syntax = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = json_error(JsonPayloadError::Deserialize(syntax), &req);
        let app_error = err.as_error::<AppError>().unwrap();
        assert!(matches!(app_error, AppError::JsonParse(_)));

        let data = serde_json::from_str::<u32>("\"text\"").unwrap_err();
        let err = json_error(JsonPayloadError::Deserialize(data), &req);
        let app_error = err.as_error::<AppError>().unwrap();
        assert!(matches!(app_error, AppError::MessageNotReadable(_)));
        assert_eq!(app_error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_limiter_builds_for_any_rate() {
        build_limiter(0);
        build_limiter(1);
        build_limiter(120_000);
    }
}
