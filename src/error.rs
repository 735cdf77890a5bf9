// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error classification.
//!
//! [`ApiError`] is the one place where a failure becomes an HTTP status and a
//! JSON body. Every body has the shape `{"error": <label>, "message": <text>}`.
//!
//! | Failure | Status | `error` |
//! |---------|--------|---------|
//! | any [`AuthError`] | 401 | `Unauthorized` |
//! | bad login credentials | 401 | `Authentication Failed` |
//! | invalid client input | 400 | `Validation Error` |
//! | anything else | 500 | `Internal Server Error` |

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthError;

pub const VALIDATION_LABEL: &str = "Validation Error";
pub const UNAUTHORIZED_LABEL: &str = "Unauthorized";
pub const AUTHENTICATION_FAILED_LABEL: &str = "Authentication Failed";
pub const INTERNAL_LABEL: &str = "Internal Server Error";

const INTERNAL_MESSAGE: &str = "Something went wrong";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Debug)]
pub enum ApiError {
    /// Malformed client input
    Validation(String),
    /// Gate failure
    Unauthorized(AuthError),
    /// Login with unknown user or wrong password
    AuthenticationFailed,
    /// Unexpected failure; the detail is logged, never returned
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable error label
    pub error: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => VALIDATION_LABEL,
            ApiError::Unauthorized(_) => UNAUTHORIZED_LABEL,
            ApiError::AuthenticationFailed => AUTHENTICATION_FAILED_LABEL,
            ApiError::Internal(_) => INTERNAL_LABEL,
        }
    }

    /// Client-safe message.
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Unauthorized(failure) => failure.to_string(),
            ApiError::AuthenticationFailed => INVALID_CREDENTIALS_MESSAGE.to_string(),
            ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Map the failure to its status code and response body.
    pub fn classify(&self) -> (StatusCode, ErrorBody) {
        (
            self.status_code(),
            ErrorBody {
                error: self.label().to_string(),
                message: self.message(),
            },
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(failure: AuthError) -> Self {
        ApiError::Unauthorized(failure)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        ApiError::validation("Request body must be valid JSON")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "internal error");
        }

        let (status, body) = self.classify();
        (status, Json(body)).into_response()
    }
}
