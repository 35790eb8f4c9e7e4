//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for registration, login and the current-user query.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::{DateTime, Utc};
use course_shop_core::domain::{PublicUser, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorResponse};
use crate::web::extract::{lenient_string, JsonBody};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

// Missing or non-string fields deserialize as empty strings so they are
// reported as "all fields are required" rather than as a JSON rejection.
#[derive(Deserialize, Default, ToSchema)]
pub struct RegisterRequest {
    #[serde(default, alias = "nome", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, alias = "senha", deserialize_with = "lenient_string")]
    pub password: String,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, alias = "senha", deserialize_with = "lenient_string")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[schema(example = "customer")]
    pub role: String,
}

impl From<PublicUser> for UserResponse {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Absent for the seeded admin account.
    pub registered_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/cadastro - Create a customer account
#[utoipa::path(
    post,
    path = "/api/auth/cadastro",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Missing fields, malformed JSON or email already registered", body = ErrorResponse)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .shop
        .register(&req.name, &req.email, &req.password)
        .await
        .inspect_err(|e| warn!("Registration rejected: {}", e))?;

    info!("Registered user {} ({})", session.user.id, session.user.email);

    let response = AuthResponse {
        message: "Registration successful".to_string(),
        token: session.token,
        user: session.user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing email or password, or malformed JSON", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .shop
        .login(&req.email, &req.password)
        .await
        .inspect_err(|e| warn!("Login rejected for {:?}: {}", req.email, e))?;

    info!("User {} logged in", session.user.id);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token: session.token,
        user: session.user.into(),
    }))
}

/// GET /api/usuario - The account behind the supplied token
#[utoipa::path(
    get,
    path = "/api/usuario",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    params(
        ("Authorization" = String, Header, description = "The session token, sent as-is.")
    )
)]
pub async fn current_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Json<CurrentUserResponse> {
    let user = state.shop.current_user(&user);

    Json(CurrentUserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role.as_str().to_string(),
        registered_at: user.registered_at,
    })
}
