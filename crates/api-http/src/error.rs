//! Control Plane Error Types
//!
//! Maps boundary failures to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pollwatch_core::application::SubmitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    /// Path segment is not an integer job id
    #[error("invalid job id: {0}")]
    InvalidJobId(String),

    /// Command queue is full (or closed after Exit); the caller may retry
    #[error("control queue unavailable: {0}")]
    Unavailable(#[from] SubmitError),
}

impl ControlError {
    pub fn status(&self) -> StatusCode {
        match self {
            ControlError::InvalidJobId(_) => StatusCode::BAD_REQUEST,
            ControlError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ControlError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
