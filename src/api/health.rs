// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Service endpoints: health, root banner, and the 404 fallback.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::models::{iso_timestamp, HealthResponse, NotFoundBody, RootResponse};
use crate::state::AppState;

/// Liveness check.
///
/// Public; always returns 200 while the process is serving.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(),
    })
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Service banner", body = RootResponse),
        (status = 401, description = "Unauthorized - invalid or missing token", body = crate::error::ErrorBody)
    )
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Gateway Server".to_string(),
        environment: state.environment.clone(),
        timestamp: iso_timestamp(),
    })
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<NotFoundBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "Not Found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}
