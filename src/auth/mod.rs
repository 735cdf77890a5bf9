// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token authentication for the gateway.
//!
//! ## Auth Flow
//!
//! 1. Client logs in at `POST /auth/login` and receives an HS256 JWT
//! 2. Client sends `Authorization: Bearer <token>` on protected routes
//! 3. Gateway:
//!    - Skips public paths (`/health`, `/docs`, `/openapi.json`, `/auth`)
//!    - Verifies the signature with `JWT_SECRET` and checks `exp`
//!    - Extracts:
//!      - `sub` (or `userId`) → `user_id`
//!      - `email`, `role`, and the full claims set
//!
//! ## Security
//!
//! - HS256 only, no clock skew leeway
//! - Tokens and secrets are never logged or echoed in responses
//! - Tokens are stateless; there is no revocation list

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod policy;
pub mod token;

pub use claims::{ClaimsSet, IdentityContext};
pub use error::{AuthError, FailureKind};
pub use extractor::Auth;
pub use middleware::{auth_middleware, authenticate, AuthConfig};
