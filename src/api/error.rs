use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::ExplorerError;

/// Body returned for every server-side failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    Explorer(ExplorerError),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Explorer(err) => write!(f, "{err}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Explorer(err) => {
                tracing::error!(kind = err.kind(), "Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        Self::Explorer(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
