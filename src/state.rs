// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthConfig;
use crate::config::DEFAULT_ENVIRONMENT;
use crate::store::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthConfig,
    pub users: Arc<RwLock<UserDirectory>>,
    /// Deployment label echoed by `GET /`
    pub environment: String,
}

impl AppState {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            users: Arc::new(RwLock::new(UserDirectory::new())),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AuthConfig::default())
    }
}
