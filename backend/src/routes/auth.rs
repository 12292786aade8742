//! Authentication routes
//!
//! Endpoints for user registration, login, and the current-user lookup
//! that demonstrates the authentication extractor.
//!
//! # Performance
//!
//! Token issuance uses the pre-computed keys from AppState; password work
//! runs on the blocking thread pool inside the service.

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::routes::extract::ValidatedJson;
use crate::services::AuthService;
use crate::state::AppState;
use auth_service_shared::types::{ApiResponse, LoginRequest, PublicUser, RegisterRequest};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PublicUser>>)> {
    let user =
        AuthService::register(state.users.as_ref(), &req.name, &req.email, &req.password).await?;
    let token = state.jwt().issue(user.id, &user.email)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            message: Some("User registered successfully".to_string()),
            data: Some(user),
            errors: None,
            token: Some(token),
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let user = AuthService::login(state.users.as_ref(), &req.email, &req.password).await?;
    let token = state.jwt().issue(user.id, &user.email)?;

    Ok(Json(ApiResponse {
        success: true,
        message: Some("User logged in successfully".to_string()),
        data: Some(user),
        errors: None,
        token: Some(token),
    }))
}

/// Current authenticated user
///
/// GET /api/auth/me returns the identity the middleware attached.
async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<PublicUser>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(user),
        errors: None,
        token: None,
    })
}
