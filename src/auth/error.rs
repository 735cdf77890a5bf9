// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Every way the gate can refuse a request is an [`AuthError`]. The error
//! carries a [`FailureKind`] for logs and a message suitable for clients.
//! Conversion to an HTTP response happens only in [`crate::error::ApiError`].

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::ApiError;

/// Category of an authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No `Authorization: Bearer` credential was presented
    MissingCredential,
    /// Credential present but structurally unusable
    MalformedCredential,
    /// Signature or algorithm did not verify against the configured secret
    InvalidSignature,
    /// Signature verified but the token is past its expiry
    Expired,
    /// The service has no usable signing secret
    ConfigurationError,
}

impl FailureKind {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::MissingCredential => "missing_credential",
            FailureKind::MalformedCredential => "malformed_credential",
            FailureKind::InvalidSignature => "invalid_signature",
            FailureKind::Expired => "token_expired",
            FailureKind::ConfigurationError => "configuration_error",
        }
    }

    /// Client-facing message.
    ///
    /// Every token defect maps to the same text.
    pub fn public_message(&self) -> &'static str {
        match self {
            FailureKind::MissingCredential => "Missing or invalid authorization header",
            FailureKind::MalformedCredential
            | FailureKind::InvalidSignature
            | FailureKind::Expired => "Invalid or expired token",
            FailureKind::ConfigurationError => "Authentication configuration error",
        }
    }

    /// Whether the failure is the server's fault rather than the client's.
    pub fn is_server_side(&self) -> bool {
        matches!(self, FailureKind::ConfigurationError)
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Gate failure: a kind plus a diagnostic detail for server-side logs.
///
/// `Display` yields the public message; `detail` never reaches the client.
#[derive(Debug, Clone, Error)]
#[error("{}", .kind.public_message())]
pub struct AuthError {
    kind: FailureKind,
    detail: String,
}

impl AuthError {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn missing_credential(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::MissingCredential, detail)
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedCredential, detail)
    }

    pub fn invalid_signature(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidSignature, detail)
    }

    pub fn expired() -> Self {
        Self::new(FailureKind::Expired, "token is past its expiry")
    }

    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::ConfigurationError, detail)
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
