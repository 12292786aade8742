//! Request validation extractor
//!
//! Schema-based validation that runs before the handler body: the JSON
//! payload is deserialized and checked against the type's `#[validate]`
//! rules, and every violation is normalized into the Validation error
//! with a field-error list. Handlers behind [`ValidatedJson`] only ever
//! see a well-formed request.

use auth_service_shared::types::FieldError;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON extractor with schema validation
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            // No field path when the body itself fails to parse
            AppError::validation_with_errors(
                "Validation failed",
                vec![FieldError {
                    field: String::new(),
                    message: rejection.body_text(),
                }],
            )
        })?;

        value.validate().map_err(|errors| {
            AppError::validation_with_errors("Validation failed", field_errors(errors))
        })?;

        Ok(ValidatedJson(value))
    }
}

fn field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| FieldError {
                field: field.to_string(),
                message: violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect()
}
