//! JSON error envelope returned by every failing request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, ValidationError};

/// Links and version information attached to error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResponseMetadata {
    #[serde(rename = "apiVersion")]
    #[schema(example = "v1")]
    pub api_version: String,
    #[serde(rename = "reportTo")]
    pub send_report_uri: String,
    #[serde(rename = "moreInfo")]
    pub more_info_url: String,
    #[serde(rename = "documentation")]
    pub api_documentation: String,
    pub technical: String,
}

/// Request attributes copied into an [`ApiError`].
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub trace_id: String,
    pub path: String,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub trace_id: String,
    #[schema(example = "/api/v1/employees/JODO1234")]
    pub path: String,
    #[schema(example = "GET")]
    pub method: String,
    #[schema(example = "EMP-NF-001")]
    pub code: String,
    #[schema(example = "NOT_FOUND")]
    pub status: String,
    #[schema(example = 404)]
    pub status_code: u16,
    #[schema(example = "Employee not found")]
    pub message: String,
    #[schema(example = "Employee not found with id: JODO1234")]
    pub debug_message: String,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ApiError {
    pub fn from_app_error(error: &AppError, ctx: &RequestContext) -> Self {
        use actix_web::ResponseError;

        let status = error.status_code();
        let code = error.error_code();
        Self {
            trace_id: ctx.trace_id.clone(),
            path: ctx.path.clone(),
            method: ctx.method.clone(),
            code: code.as_ref().to_string(),
            status: status_name(status),
            status_code: status.as_u16(),
            message: code.default_message().to_string(),
            debug_message: error.to_string(),
            timestamp: Utc::now(),
            errors: error.validation_errors().to_vec(),
        }
    }
}

/// `404 Not Found` becomes `NOT_FOUND`.
fn status_name(status: actix_web::http::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "ERROR!")]
    pub message: String,
    pub metadata: Option<ResponseMetadata>,
    pub response: ApiError,
}

impl AppResponse {
    pub fn error(error: ApiError, metadata: Option<ResponseMetadata>) -> Self {
        Self {
            success: false,
            message: "ERROR!".to_string(),
            metadata,
            response: error,
        }
    }
}
