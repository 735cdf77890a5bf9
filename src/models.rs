// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API. All response types
//! derive `Serialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Field names follow the camelCase wire format.
//!
//! ## Model Categories
//!
//! - **Login**: credentials in, signed token and user summary out
//! - **Users**: directory records, caller profile, user creation
//! - **Service**: health and root banners

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current UTC time in ISO 8601 with millisecond precision.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Loose email check: `local@domain.tld` with no whitespace, a single `@`,
/// and at least two characters after the final dot.
pub fn is_valid_email(email: &str) -> bool {
    let normalized = email.trim().to_lowercase();
    if normalized.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = normalized.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && domain[i + 1..].chars().count() >= 2)
}

// =============================================================================
// Login
// =============================================================================

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((username, password))
    }
}

/// Public view of an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Successful login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    /// Signed bearer token
    pub token: String,
    pub user: UserSummary,
    /// Token lifetime, always `"24h"`
    pub expires_in: String,
}

// =============================================================================
// Users
// =============================================================================

/// Directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Directory entry stamped with the response time.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub formatted_at: String,
}

impl From<UserRecord> for FormattedUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
            formatted_at: iso_timestamp(),
        }
    }
}

/// Response for `GET /users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<FormattedUser>,
}

/// Response for `POST /users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub data: FormattedUser,
}

/// The caller's own profile.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// User ID from the token
    pub id: String,
    /// Directory name, absent for users unknown to the directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email from the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role from the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub formatted_at: String,
}

/// Response for `GET /users/profile`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub data: Profile,
}

/// Body for `POST /users`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Check required fields, returning the trimmed name and normalized email.
    pub fn validate(&self) -> Result<(String, String), &'static str> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err("Name is required");
        }

        let email = self.email.as_deref().unwrap_or_default();
        if !is_valid_email(email) {
            return Err("A valid email address is required");
        }

        Ok((name.to_string(), email.trim().to_lowercase()))
    }
}

// =============================================================================
// Service
// =============================================================================

/// Response for `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Response for `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub environment: String,
    pub timestamp: String,
}

/// Response for unknown routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundBody {
    pub error: String,
    pub path: String,
}
