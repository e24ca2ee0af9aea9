//! Mapping from service failures to HTTP responses.

use crate::app::ServiceError;
use crate::domain::{DomainError, FieldViolation};
use crate::transport::http::types::ExceptionDetails;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub const BAD_REQUEST_TITLE: &str = "Bad Request Exception, Check the Documentation";
pub const INVALID_FIELDS_TITLE: &str = "Bad Request Exception, Invalid Fields";

#[derive(Debug)]
pub enum ApiError {
    /// Unknown id, surfaced as 400.
    BadRequest(String),
    Validation(Vec<FieldViolation>),
    /// Malformed query string or path segment.
    InvalidRequest(String),
    /// Body that is not valid JSON for the expected type.
    UnprocessableBody(String),
    Internal(String),
}

impl ApiError {
    fn details(&self) -> (StatusCode, ExceptionDetails) {
        match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ExceptionDetails::new(BAD_REQUEST_TITLE, 400, msg, "ServiceError::BadRequest"),
            ),
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                ExceptionDetails::new(
                    INVALID_FIELDS_TITLE,
                    400,
                    "Check the field(s) error",
                    "DomainError::Validation",
                )
                .with_violations(violations),
            ),
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ExceptionDetails::new("Bad Request", 400, msg, "InvalidRequest"),
            ),
            ApiError::UnprocessableBody(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ExceptionDetails::new("Unprocessable Entity", 422, msg, "JsonRejection"),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ExceptionDetails::new("Internal Server Error", 500, msg, "RepositoryError"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            error!(error = %msg, "request failed");
        }
        let (status, body) = self.details();
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(msg) => ApiError::BadRequest(msg),
            ServiceError::Validation(DomainError::Validation(v)) => ApiError::Validation(v),
            ServiceError::Repository(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::UnprocessableBody(format!("Invalid JSON body: {}", err.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::InvalidRequest(err.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::InvalidRequest(err.body_text())
    }
}
