pub mod routes;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::tasks::RepositoryError;

// RESPONSES

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ERRORS

/// Everything a task handler can fail with, already decided down to the status code.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    InvalidId,
    InvalidPayload(String),
    NotFound,
    Internal(&'static str),
}

impl ApiError {
    /// Maps a storage failure for the given action. Anything other than a
    /// missing task is logged and reported as a 500 carrying `failure`.
    pub fn from_repository(error: RepositoryError, failure: &'static str) -> Self {
        match error {
            RepositoryError::NotFound(_) => Self::NotFound,
            other => {
                tracing::error!(error = %other, "{failure}");
                Self::Internal(failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidId => "Invalid task ID".to_string(),
            Self::InvalidPayload(detail) => format!("Invalid request payload: {detail}"),
            Self::NotFound => "Task not found".to_string(),
            Self::Internal(failure) => failure.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
