//! services/api/src/web/middleware.rs
//!
//! Authentication and authorization middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use course_shop_core::domain::User;
use course_shop_core::service::require_admin as check_admin;
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::web::state::AppState;

/// Middleware that resolves the raw `Authorization` header to a user.
///
/// If valid, inserts the `User` into request extensions for handlers to use.
/// If missing or unknown, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let user = state
        .shop
        .authenticate(token.as_deref())
        .await
        .inspect_err(|e| warn!("Rejected request to {}: {}", req.uri().path(), e))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that only lets admins through. Must run after `require_auth`.
pub async fn require_admin(
    Extension(user): Extension<User>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_admin(&user).inspect_err(|_| {
        warn!("User {} denied access to {}", user.id, req.uri().path())
    })?;

    Ok(next.run(req).await)
}
