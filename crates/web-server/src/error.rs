use axum::{
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::ValidationError;
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request body could not be read as a form: {0}")]
    Form(#[from] FormRejection),
    #[error("Query string could not be read as form fields: {0}")]
    Query(#[from] QueryRejection),
    #[error("Path could not be decoded: {0}")]
    Path(#[from] PathRejection),
    #[error("Wrong {field}: {reason}")]
    Parse { field: &'static str, reason: String },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl AppError {
    pub(crate) fn parse(field: &'static str, reason: impl ToString) -> Self {
        AppError::Parse { field, reason: reason.to_string() }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Clients only get the status code; the reason is written to the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Form(rejection) => {
                tracing::error!(error = %rejection, "Request parsing failed.");
                StatusCode::BAD_REQUEST
            }
            AppError::Query(rejection) => {
                tracing::error!(error = %rejection, "Request parsing failed.");
                StatusCode::BAD_REQUEST
            }
            AppError::Path(rejection) => {
                tracing::error!(error = %rejection, "ID parsing failed.");
                StatusCode::BAD_REQUEST
            }
            AppError::Parse { field, reason } => {
                tracing::error!(field, reason = %reason, "Request parsing failed.");
                StatusCode::BAD_REQUEST
            }
            AppError::Validation(validation_err) => {
                tracing::error!(field = validation_err.field(), error = %validation_err, "Validation failed.");
                StatusCode::BAD_REQUEST
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status.into_response()
    }
}
