// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    auth::token::{self, TOKEN_LIFETIME_LABEL},
    error::{ApiError, ErrorBody},
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

/// Log in with username and password.
///
/// Returns a bearer token valid for 24 hours.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Username or password missing", body = ErrorBody),
        (status = 401, description = "Invalid username or password", body = ErrorBody),
        (status = 500, description = "Token could not be issued", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;
    let (username, password) = request
        .credentials()
        .ok_or_else(|| ApiError::validation("Username and password are required"))?;

    let user = state
        .users
        .read()
        .await
        .authenticate(username, password)
        .ok_or_else(|| {
            tracing::info!(username, "login rejected");
            ApiError::AuthenticationFailed
        })?;

    let issued = state
        .auth
        .secret()
        .and_then(|secret| token::issue(&user, secret))
        .map_err(|e| ApiError::internal(format!("token issuance failed: {}", e.detail())))?;

    tracing::info!(user_id = %user.id, "login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: issued.token,
        user,
        expires_in: TOKEN_LIFETIME_LABEL.to_string(),
    }))
}
