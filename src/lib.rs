// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway Server - bearer-token authentication gateway
//!
//! Issues HS256 tokens at `POST /auth/login` and guards every other route
//! behind a single auth gate that verifies the `Authorization: Bearer`
//! header and attaches the caller's identity to the request.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Credential extraction, token codec, route policy, and the gate
//! - `config` - Environment-driven runtime configuration
//! - `error` - Error classification into HTTP responses
//! - `store` - In-memory accounts and user directory

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
