//! Application error handling
//!
//! This module provides the typed error taxonomy for the API and the
//! terminal stage that converts any propagated error into the uniform
//! JSON envelope. Business logic raises `AppError` values and lets them
//! bubble up; nothing catches and re-wraps along the way.

use crate::config::AppConfig;
use auth_service_shared::types::{ApiResponse, FieldError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::repositories::StoreError;

/// Application error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Option<Vec<FieldError>>,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Authentication(String),

    /// Reserved for deactivated accounts; no code path constructs it yet.
    #[error("{0}")]
    AccountDeactivation(String),

    #[error("{0}")]
    UserNotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Validation failure without per-field detail
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: None,
        }
    }

    /// Validation failure carrying a field-error list
    pub fn validation_with_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: Some(errors),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // A storage-level duplicate is a conflict even when the
            // pre-check missed it (two requests racing on one email).
            StoreError::DuplicateEmail => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, message, errors)
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::AccountDeactivation(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::UserNotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Internal(err) => {
                if AppConfig::is_production() {
                    error!("Unhandled internal error");
                } else {
                    error!(kind = "Internal", "Unhandled internal error: {:?}", err);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Database(err) => {
                if AppConfig::is_production() {
                    error!("Unhandled database error");
                } else {
                    error!(kind = "Database", "Unhandled database error: {:?}", err);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body: Json<ApiResponse<()>> = Json(ApiResponse {
            success: false,
            message: Some(message),
            data: None,
            errors,
            token: None,
        });

        (status, body).into_response()
    }
}

/// Result type alias for request handlers
pub type AppResult<T> = Result<T, AppError>;
