//! # HTTP Errors
//!
//! Error types for site routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for site handlers
pub type SiteResult<T> = Result<T, SiteError>;

/// Site route errors
#[derive(Debug, Clone, Error)]
pub enum SiteError {
    /// No route, or a gated section
    #[error("Not Found")]
    NotFound,

    /// No published post with this slug
    #[error("Post not found: {0}")]
    PostNotFound(String),
}

impl SiteError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::NotFound => StatusCode::NOT_FOUND,
            SiteError::PostNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<SiteError> for ErrorResponse {
    fn from(err: SiteError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
