//! Error types for WanderWise server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable error codes carried in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    BadValue = 2,
    ConfigurationMissing = 3,
    ExternalFailure = 4,
    GenerationFailure = 5,
    PlanFailure = 6,
    ExportFailure = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Plan failed: {0}")]
    PlanFailure(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to show on the planner page
    pub fn user_message(&self) -> String {
        match self {
            AppError::Configuration(msg)
            | AppError::Validation(msg)
            | AppError::PlanFailure(msg) => msg.clone(),
            AppError::Export(_) => "Failed to generate PDF".to_string(),
            AppError::Http(_) | AppError::ExternalService(_) | AppError::Generation(_) => {
                "Failed to generate itinerary".to_string()
            }
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Configuration(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ConfigurationMissing)
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Http(e) => {
                tracing::error!("Outbound HTTP error: {:?}", e);
                (StatusCode::BAD_GATEWAY, ErrorCode::ExternalFailure)
            }
            AppError::ExternalService(msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, ErrorCode::ExternalFailure)
            }
            AppError::Generation(_) => (StatusCode::BAD_GATEWAY, ErrorCode::GenerationFailure),
            AppError::PlanFailure(_) => (StatusCode::BAD_GATEWAY, ErrorCode::PlanFailure),
            AppError::Export(msg) => {
                tracing::error!("Export error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ExportFailure)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure)
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: self.user_message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
