// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token codec.
//!
//! Tokens are compact JWTs signed with the shared secret. Verification is a
//! pure function of `(token, secret, now)`: no caches, no global state.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::{claims::ClaimsSet, AuthError};
use crate::models::UserSummary;

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Lifetime as reported to clients at login.
pub const TOKEN_LIFETIME_LABEL: &str = "24h";

/// No clock skew tolerance: a token is dead the second `exp` passes.
const CLOCK_SKEW_LEEWAY: u64 = 0;

/// The only accepted signing algorithm.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: ClaimsSet,
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify(token: &str, secret: &[u8]) -> Result<ClaimsSet, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::configuration("signing secret is empty"));
    }
    if token.is_empty() {
        return Err(AuthError::malformed("bearer token is empty"));
    }

    let key = DecodingKey::from_secret(secret);
    let token_data = decode::<ClaimsSet>(token, &key, &validation()).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::expired(),
            ErrorKind::InvalidSignature => AuthError::invalid_signature("signature mismatch"),
            ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                AuthError::invalid_signature("algorithm mismatch")
            }
            _ => AuthError::malformed(e.to_string()),
        }
    })?;

    // A token is dead from the `exp` second onward.
    let claims = token_data.claims;
    if claims.exp <= Utc::now().timestamp() {
        return Err(AuthError::expired());
    }

    Ok(claims)
}

/// Sign a token for `user`, valid for [`TOKEN_LIFETIME_SECS`] from now.
pub fn issue(user: &UserSummary, secret: &[u8]) -> Result<IssuedToken, AuthError> {
    issue_at(user, secret, Utc::now())
}

/// Sign a token for `user` as if issued at `issued_at`.
pub fn issue_at(
    user: &UserSummary,
    secret: &[u8],
    issued_at: DateTime<Utc>,
) -> Result<IssuedToken, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::configuration("signing secret is empty"));
    }

    let expires_at = issued_at + Duration::seconds(TOKEN_LIFETIME_SECS);
    let claims = ClaimsSet {
        sub: Some(user.id.clone()),
        user_id: Some(user.id.clone()),
        email: Some(user.email.clone()),
        role: Some(user.role.clone()),
        iat: Some(issued_at.timestamp()),
        exp: expires_at.timestamp(),
        extra: Default::default(),
    };

    let mut header = Header::new(ALGORITHM);
    header.typ = Some("JWT".to_string());

    let token = encode(&header, &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AuthError::configuration(format!("failed to sign token: {e}")))?;

    Ok(IssuedToken { token, claims })
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation.validate_aud = false;
    validation
}
