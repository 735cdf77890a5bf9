// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! The gate runs in front of every route. For each request it:
//!
//! 1. Consults the [route policy](super::policy) and lets public paths through.
//! 2. Reads `Authorization: Bearer <token>`.
//! 3. Verifies the token with the secret from [`AuthConfig`].
//! 4. Inserts the resulting [`IdentityContext`] into the request extensions
//!    and calls the inner service.
//!
//! Any failure short-circuits with an [`AuthError`] response; the inner
//! service never runs and no partial identity is exposed.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(axum::middleware::from_fn_with_state(
//!         auth_config.clone(),
//!         auth_middleware,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{policy, token, AuthError, IdentityContext};

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication configuration.
///
/// Holds the shared signing secret. It is injected when the router is built
/// and read on every request; nothing in the gate looks at the environment.
#[derive(Clone, Default)]
pub struct AuthConfig {
    secret: Option<Arc<[u8]>>,
}

impl AuthConfig {
    /// Create a configuration from an optional secret.
    ///
    /// An empty secret counts as absent.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret
                .filter(|s| !s.is_empty())
                .map(|s| Arc::from(s.into_bytes())),
        }
    }

    /// Create a configuration with the given secret.
    pub fn with_secret(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            secret: (!secret.is_empty()).then(|| Arc::from(secret)),
        }
    }

    /// Whether a signing secret is available.
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// The signing secret, or a configuration failure when none is set.
    pub fn secret(&self) -> Result<&[u8], AuthError> {
        self.secret
            .as_deref()
            .ok_or_else(|| AuthError::configuration("JWT_SECRET is not configured"))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Extract the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::missing_credential("no authorization header"))?
        .to_str()
        .map_err(|_| AuthError::missing_credential("authorization header is not valid ASCII"))?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| AuthError::missing_credential("authorization scheme is not Bearer"))
}

/// Authenticate a request from its headers.
pub fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> Result<IdentityContext, AuthError> {
    let token = bearer_token(headers)?;
    let secret = config.secret()?;
    let claims = token::verify(token, secret)?;
    IdentityContext::from_claims(claims)
}

/// Authentication middleware function.
pub async fn auth_middleware(
    State(config): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if policy::is_public(path) {
        return next.run(request).await;
    }

    match authenticate(request.headers(), &config) {
        Ok(identity) => {
            tracing::debug!(user_id = %identity.user_id, path, "request authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(failure) => {
            log_failure(&failure, path);
            failure.into_response()
        }
    }
}

fn log_failure(failure: &AuthError, path: &str) {
    let kind = failure.kind();
    if kind.is_server_side() {
        tracing::error!(kind = %kind, detail = failure.detail(), path, "authentication misconfigured");
    } else {
        tracing::warn!(kind = %kind, detail = failure.detail(), path, "authentication failed");
    }
}
