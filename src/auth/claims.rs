// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and the per-request identity context.

use std::collections::HashMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::AuthError;

/// Claim names that may carry the caller's identity, highest priority first.
pub const IDENTITY_CLAIMS: [&str; 2] = ["sub", "userId"];

/// Decoded payload of a gateway token.
///
/// Known claims are typed; anything else the issuer added is kept in
/// `extra` so downstream handlers still see the full set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimsSet {
    /// Subject (user ID)
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,

    /// Alternate user ID claim
    #[serde(
        default,
        rename = "userId",
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration timestamp
    pub exp: i64,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Identity claims may be issued as JSON numbers; both forms read as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "identity claim must be a string or number, found {other}"
        ))),
    }
}

impl ClaimsSet {
    /// Look up a string claim by its wire name.
    pub fn claim(&self, name: &str) -> Option<&str> {
        match name {
            "sub" => self.sub.as_deref(),
            "userId" => self.user_id.as_deref(),
            "email" => self.email.as_deref(),
            "role" => self.role.as_deref(),
            other => self.extra.get(other).and_then(|v| v.as_str()),
        }
    }

    /// First non-empty identity claim from [`IDENTITY_CLAIMS`].
    pub fn identity(&self) -> Option<&str> {
        IDENTITY_CLAIMS
            .iter()
            .filter_map(|name| self.claim(name))
            .find(|value| !value.is_empty())
    }
}

/// Verified caller identity attached to a request by the auth gate.
///
/// Handlers obtain it through the [`super::Auth`] extractor and never look
/// at the raw token.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityContext {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub claims: ClaimsSet,
}

impl IdentityContext {
    /// Build from a verified claims set.
    pub fn from_claims(claims: ClaimsSet) -> Result<Self, AuthError> {
        let user_id = claims
            .identity()
            .ok_or_else(|| AuthError::malformed("token carries no identity claim"))?
            .to_string();

        Ok(Self {
            user_id,
            email: claims.email.clone(),
            role: claims.role.clone(),
            claims,
        })
    }
}
