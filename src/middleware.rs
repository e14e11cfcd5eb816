use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{
        StatusCode,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    web::Data,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::response::{ApiError, AppResponse, RequestContext};

pub const TRACE_ID_HEADER: &str = "X-B3-TraceId";

/// Seconds until the next permit, set by the rate limiter on 429 responses.
const RATE_LIMIT_AFTER_HEADER: &str = "x-ratelimit-after";

/// Rewrites every [`AppError`] response into the full error envelope with
/// request path, method, trace id and links from the config.
pub async fn error_envelope(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let trace_id = req
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_simple().to_string());
    let ctx = RequestContext {
        trace_id,
        path: req.path().to_string(),
        method: req.method().to_string(),
    };
    let config = req.app_data::<Data<Config>>().cloned();

    let res = next.call(req).await?;
    let status = res.status();

    let api_error = match res.response().error().and_then(|e| e.as_error::<AppError>()) {
        Some(app_error) => {
            log_failure(&ctx, status, app_error);
            ApiError::from_app_error(app_error, &ctx)
        }
        // the rate limiter answers with a bare 429
        None if status == StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = res
                .headers()
                .get(RATE_LIMIT_AFTER_HEADER)
                .and_then(|h| h.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            let app_error = AppError::TooManyRequests { retry_after_secs };
            log_failure(&ctx, status, &app_error);
            ApiError::from_app_error(&app_error, &ctx)
        }
        None => return Ok(res),
    };
    let metadata = config.map(|c| c.response_metadata(&ctx.trace_id));

    let (req, original) = res.into_parts();
    let mut response = HttpResponse::build(status).json(AppResponse::error(api_error, metadata));
    for (name, value) in original.headers() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }
    Ok(ServiceResponse::new(req, response))
}

fn log_failure(ctx: &RequestContext, status: StatusCode, app_error: &AppError) {
    if status.is_server_error() {
        error!(trace_id = %ctx.trace_id, path = %ctx.path, error = %app_error, "Request failed");
    } else {
        warn!(trace_id = %ctx.trace_id, path = %ctx.path, error = %app_error, "Request rejected");
    }
}
