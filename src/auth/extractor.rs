// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated callers.
//!
//! Use the `Auth` extractor in handlers behind the gate:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is IdentityContext
//! }
//! ```
//!
//! The extractor only reads what the middleware stored in the request
//! extensions. It never parses the `Authorization` header itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, IdentityContext};

/// Extractor for the verified caller identity.
pub struct Auth(pub IdentityContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| AuthError::missing_credential("no identity attached to request"))
    }
}
