//! Authentication middleware
//!
//! Extracts the bearer token from an incoming request, verifies it, loads
//! the user, and hands the downstream handler a sanitized identity. No
//! caching: every request re-verifies the token and re-queries storage.

use crate::auth::jwt::TokenVerification;
use crate::error::AppError;
use crate::state::AppState;
use auth_service_shared::types::PublicUser;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated identity attached to the request
///
/// The wrapped [`PublicUser`] is the password-stripped projection; handlers
/// never see the stored record.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        // A missing header and a non-Bearer scheme are indistinguishable to
        // the client; both fail before any token parsing.
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Could not validate token".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Could not validate token".to_string()))?;

        let claims = match state.jwt().verify(token) {
            TokenVerification::Valid { claims } => claims,
            // The arm's error string reaches the client verbatim.
            TokenVerification::Invalid { error } => return Err(AppError::Authentication(error)),
        };

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Authentication("Invalid token".to_string()))?;

        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound("User not found".to_string()))?;

        Ok(CurrentUser(user.into_public()))
    }
}
