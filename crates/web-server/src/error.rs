use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::{ApiError, ApiErrorType};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Configuration error: {0}")]
    Config(#[from] configuration::error::ConfigError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

// Malformed path segments and query strings get the same JSON error body as
// every other failure instead of axum's plain-text rejection.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Statement construction failures are the caller's fault; everything else is ours.
pub fn status_for(kind: ApiErrorType) -> StatusCode {
    match kind {
        ApiErrorType::BuildSql => StatusCode::BAD_REQUEST,
        ApiErrorType::ExecuteSql | ApiErrorType::General | ApiErrorType::Unknown => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, name, message, errors) = match self {
            AppError::Api(api_err) => {
                let status = status_for(api_err.kind());
                if status.is_server_error() {
                    tracing::error!(name = api_err.name(), errors = ?api_err.errors(), "{}", api_err.message());
                } else {
                    tracing::warn!(name = api_err.name(), errors = ?api_err.errors(), "{}", api_err.message());
                }
                (
                    status,
                    api_err.name().to_string(),
                    api_err.message().to_string(),
                    api_err.errors().to_vec(),
                )
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorType::Unknown.to_string(),
                    "An internal database error occurred".to_string(),
                    Vec::new(),
                )
            }
            AppError::Config(config_err) => {
                tracing::error!(error = ?config_err, "Configuration error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorType::General.to_string(),
                    "A server configuration error occurred".to_string(),
                    Vec::new(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, "HTTP404".to_string(), message, Vec::new()),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, "HTTP400".to_string(), message, Vec::new()),
        };

        let body = Json(json!({
            "name": name,
            "status": status.as_u16(),
            "message": message,
            "errors": errors,
        }));
        (status, body).into_response()
    }
}
