//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ApiResponse;
use crate::application::ApplicationError;

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 资源不存在：(message, details)
    NotFound(String, String),
    EmptyPage,
    BadRequest(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(..) | ApiError::EmptyPage => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(message, details) => {
                tracing::warn!(status = status.as_u16(), error = %details, "Resource not found");
                ApiResponse::error(message, details)
            }
            ApiError::EmptyPage => {
                tracing::debug!(status = status.as_u16(), "Requested page is empty");
                ApiResponse::error("This page is empty", "empty page")
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                ApiResponse::error("Invalid request", msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Record source failure");
                ApiResponse::error("Error occurred", msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                ApiResponse::error("Internal server error", msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found.", resource_type), e.to_string())
            }
            ApplicationError::NoneAvailable(_) => {
                ApiError::NotFound("Nothing to show yet.".to_string(), e.to_string())
            }
            ApplicationError::EmptyPage => ApiError::EmptyPage,
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::SourceFault(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
