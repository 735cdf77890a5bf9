// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public route policy.
//!
//! A path is public when it starts with one of [`PUBLIC_PATH_PREFIXES`].
//! Matching is by plain string prefix, so `/docs` also covers
//! `/docs/swagger-ui.css` and `/auth` covers `/auth/login`. Note that this
//! includes sibling paths such as `/healthz` and `/authorize`; add routes
//! under those names only if they are meant to be public.

/// Path prefixes that bypass the auth gate, in evaluation order.
pub const PUBLIC_PATH_PREFIXES: [&str; 4] = ["/health", "/docs", "/openapi.json", "/auth"];

/// Whether `path` skips authentication.
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}
