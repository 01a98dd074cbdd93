//! Error handling for the quiz service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("No items available")]
    NoItemsAvailable,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::NoItemsAvailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::NoItemsAvailable => "NO_ITEMS_AVAILABLE",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Store { .. } => "STORE_ERROR",
        }
    }

    /// True for domain outcomes the client caused or can expect, as opposed to failures.
    pub fn is_domain_outcome(&self) -> bool {
        matches!(
            self,
            AppError::NotFound { .. } | AppError::NoItemsAvailable | AppError::BadRequest { .. }
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            code: status.as_u16().to_string(),
        };

        if self.is_domain_outcome() {
            tracing::debug!("API outcome: {} - {}", self.error_code(), self);
        } else {
            tracing::error!("API Error: {} - {}", self.error_code(), self);
        }

        (status, Json(error_response)).into_response()
    }
}
