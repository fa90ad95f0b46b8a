//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Quadra API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! The status mapping carries the booking workflow's contract with the
//! client: a taken slot is `409 Conflict`, a missing or expired session is
//! `401 Unauthorized`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quadra_core::errors::QuadraError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `QuadraError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub QuadraError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            QuadraError::NotFound(_) => StatusCode::NOT_FOUND,
            QuadraError::Validation(_) => StatusCode::BAD_REQUEST,
            QuadraError::Authentication(_) => StatusCode::UNAUTHORIZED,
            QuadraError::Authorization(_) => StatusCode::FORBIDDEN,
            QuadraError::Conflict(_) => StatusCode::CONFLICT,
            QuadraError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QuadraError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from QuadraError to AppError.
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, QuadraError>` in handler functions that return `Result<T, AppError>`.
impl From<QuadraError> for AppError {
    fn from(err: QuadraError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Repository functions return `eyre::Result`; a failure there is a database
/// error as far as the HTTP surface is concerned.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(QuadraError::Database(err))
    }
}
