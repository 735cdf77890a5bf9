// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.
//!
//! All routes here sit behind the auth gate.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::{ApiError, ErrorBody},
    models::{
        iso_timestamp, CreateUserRequest, Profile, ProfileResponse, UserListResponse,
        UserResponse,
    },
    state::AppState,
};

/// List directory users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 401, description = "Unauthorized - invalid or missing token", body = ErrorBody)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Json<UserListResponse> {
    let users = state.users.read().await.list_users();
    Json(UserListResponse {
        data: users.into_iter().map(Into::into).collect(),
    })
}

/// Get the current caller's profile.
///
/// Identity fields come from the verified token; the name comes from the
/// directory when the user is known there.
#[utoipa::path(
    get,
    path = "/users/profile",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized - invalid or missing token", body = ErrorBody)
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Json<ProfileResponse> {
    let record = state.users.read().await.user_by_id(&identity.user_id);

    Json(ProfileResponse {
        data: Profile {
            id: identity.user_id,
            name: record.map(|r| r.name),
            email: identity.email,
            role: identity.role,
            formatted_at: iso_timestamp(),
        },
    })
}

/// Add a user to the directory.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing name or invalid email", body = ErrorBody),
        (status = 401, description = "Unauthorized - invalid or missing token", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Auth(identity): Auth,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = payload?;
    let (name, email) = request.validate().map_err(ApiError::validation)?;

    let record = state.users.write().await.create_user(name, email);
    tracing::info!(created_by = %identity.user_id, user_id = %record.id, "user created");

    Ok((StatusCode::CREATED, Json(UserResponse { data: record.into() })))
}
