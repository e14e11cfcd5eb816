//! Application error type and its mapping onto HTTP statuses.
//!
//! Every failure a handler can surface is an [`AppError`]. Its
//! [`ResponseError`] implementation renders the JSON error envelope; the
//! `error_envelope` middleware later fills in the request path, method and
//! trace id.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use strum_macros::{AsRefStr, IntoStaticStr};
use tracing::error;
use utoipa::ToSchema;

use crate::response::{ApiError, AppResponse, RequestContext};

/// Short application error codes carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
pub enum ErrorCode {
    #[strum(serialize = "SYSTEM-ERR")]
    SysDefined,
    #[strum(serialize = "APP-DEF-001")]
    AppDefined,
    #[strum(serialize = "BAD-REQ-001")]
    BadRequest,
    #[strum(serialize = "INV-DATA-001")]
    ConstraintViolation,
    #[strum(serialize = "GEN-NF-001")]
    GenericNotFound,
    #[strum(serialize = "EMP-EXIST-001")]
    EmployeeExists,
    #[strum(serialize = "EMP-NF-001")]
    EmployeeNotFound,
    #[strum(serialize = "UN-SERV-001")]
    UnavailableService,
    #[strum(serialize = "HTTP-ERR-0002")]
    MediaTypeNotSupported,
    #[strum(serialize = "HTTP-ERR-0005")]
    JsonParse,
    #[strum(serialize = "HTTP-ERR-0006")]
    MessageNotReadable,
    #[strum(serialize = "HTTP-ERR-0429")]
    TooManyRequests,
}

impl ErrorCode {
    /// Human readable message shown in the `message` field of the error body.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::SysDefined => "An unexpected error occurred, please contact the system admin",
            ErrorCode::AppDefined => "The request could not be completed",
            ErrorCode::BadRequest => "The request is invalid",
            ErrorCode::ConstraintViolation => "Data validation failed",
            ErrorCode::GenericNotFound => "The requested resource was not found",
            ErrorCode::EmployeeExists => "Employee already exists",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::UnavailableService => "Service is temporarily unavailable",
            ErrorCode::MediaTypeNotSupported => "Media type is not supported",
            ErrorCode::JsonParse => "Malformed JSON request",
            ErrorCode::MessageNotReadable => "Request body is not readable",
            ErrorCode::TooManyRequests => "Too many requests, please slow down",
        }
    }
}

/// A single failed constraint on a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[schema(example = "createEmployeeRequest")]
    pub object: String,
    #[schema(example = "firstName")]
    pub field: String,
    #[schema(example = "")]
    pub rejected_value: Option<String>,
    #[schema(example = "First name must not be blank")]
    pub message: String,
}

impl ValidationError {
    pub fn new(
        object: &str,
        field: &str,
        rejected_value: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            object: object.to_string(),
            field: field.to_string(),
            rejected_value: rejected_value.map(str::to_string),
            message: message.into(),
        }
    }
}

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Employee not found with id: {}", employee_id)]
    EmployeeNotFound { employee_id: String },

    #[display(fmt = "No resource found for {}", _0)]
    ResourceNotFound(String),

    #[display(fmt = "Employee already exists with email: {}", email)]
    EmployeeAlreadyExists { email: String },

    #[display(fmt = "Employee {} was modified by another request", employee_id)]
    ConcurrentModification { employee_id: String },

    #[display(fmt = "Validation failed with {} error(s)", "_0.len()")]
    Validation(Vec<ValidationError>),

    #[display(fmt = "Invalid request: {}", _0)]
    InvalidRequest(String),

    #[display(fmt = "JSON parse error: {}", _0)]
    JsonParse(String),

    #[display(fmt = "Unreadable request: {}", _0)]
    MessageNotReadable(String),

    #[display(fmt = "Unsupported media type: {}", _0)]
    MediaTypeNotSupported(String),

    #[display(fmt = "Too many requests, retry in {}s", retry_after_secs)]
    TooManyRequests { retry_after_secs: u64 },

    #[display(fmt = "Service unavailable: {}", _0)]
    ServiceUnavailable(String),

    #[display(fmt = "Internal error: {}", _0)]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::EmployeeNotFound { .. } => ErrorCode::EmployeeNotFound,
            AppError::ResourceNotFound(_) => ErrorCode::GenericNotFound,
            AppError::EmployeeAlreadyExists { .. } => ErrorCode::EmployeeExists,
            AppError::ConcurrentModification { .. } => ErrorCode::AppDefined,
            AppError::Validation(_) => ErrorCode::ConstraintViolation,
            AppError::InvalidRequest(_) => ErrorCode::BadRequest,
            AppError::JsonParse(_) => ErrorCode::JsonParse,
            AppError::MessageNotReadable(_) => ErrorCode::MessageNotReadable,
            AppError::MediaTypeNotSupported(_) => ErrorCode::MediaTypeNotSupported,
            AppError::TooManyRequests { .. } => ErrorCode::TooManyRequests,
            AppError::ServiceUnavailable(_) => ErrorCode::UnavailableService,
            AppError::Internal(_) => ErrorCode::SysDefined,
        }
    }

    /// Field level violations, empty for everything but [`AppError::Validation`].
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmployeeNotFound { .. } | AppError::ResourceNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::EmployeeAlreadyExists { .. } | AppError::ConcurrentModification { .. } => {
                StatusCode::CONFLICT
            }
            AppError::Validation(_)
            | AppError::InvalidRequest(_)
            | AppError::JsonParse(_)
            | AppError::MessageNotReadable(_) => StatusCode::BAD_REQUEST,
            AppError::MediaTypeNotSupported(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ApiError::from_app_error(self, &RequestContext::default());
        HttpResponse::build(self.status_code()).json(AppResponse::error(body, None))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        error!(error = %e, "Database error");
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::ServiceUnavailable("database is not reachable".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
