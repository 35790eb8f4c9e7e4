//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how each
//! kind is turned into an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use course_shop_core::ports::PortError;
use course_shop_core::service::ShopError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A rejected shop operation (bad input, failed auth, duplicates...).
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A request body that is not valid JSON (or not a JSON object).
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// The JSON body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Shop(shop) => match shop {
                ShopError::MissingFields
                | ShopError::DuplicateEmail
                | ShopError::AlreadyPurchased => StatusCode::BAD_REQUEST,
                ShopError::InvalidCredentials
                | ShopError::MissingToken
                | ShopError::InvalidToken => StatusCode::UNAUTHORIZED,
                ShopError::Forbidden => StatusCode::FORBIDDEN,
                ShopError::CourseNotFound => StatusCode::NOT_FOUND,
                ShopError::Port(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_errors_map_to_their_status_codes() {
        let cases = [
            (ShopError::MissingFields, StatusCode::BAD_REQUEST),
            (ShopError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (ShopError::AlreadyPurchased, StatusCode::BAD_REQUEST),
            (ShopError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ShopError::MissingToken, StatusCode::UNAUTHORIZED),
            (ShopError::InvalidToken, StatusCode::UNAUTHORIZED),
            (ShopError::Forbidden, StatusCode::FORBIDDEN),
            (ShopError::CourseNotFound, StatusCode::NOT_FOUND),
        ];

        for (shop, expected) in cases {
            assert_eq!(ApiError::from(shop).status_code(), expected);
        }
    }

    #[test]
    fn port_failures_are_server_errors() {
        let err = ApiError::from(ShopError::Port(PortError::Unexpected("boom".into())));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_bodies_are_bad_requests() {
        let err = ApiError::InvalidBody("expected value at line 1 column 1".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid request body"));
    }
}
