// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user directory.
//!
//! Stands in for a real account database: two fixed login accounts and a
//! small list of directory records. Records created through the API live
//! until the process exits.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{iso_timestamp, UserRecord, UserSummary};

struct Account {
    id: &'static str,
    password: &'static str,
    email: &'static str,
    role: &'static str,
}

static ACCOUNTS: [(&str, Account); 2] = [
    (
        "admin",
        Account {
            id: "1",
            password: "admin123",
            email: "admin@example.com",
            role: "admin",
        },
    ),
    (
        "user",
        Account {
            id: "2",
            password: "user123",
            email: "user@example.com",
            role: "user",
        },
    ),
];

pub struct UserDirectory {
    records: HashMap<String, UserRecord>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    /// Directory seeded with the two demo records.
    pub fn new() -> Self {
        let records = [
            ("1", "John Doe", "john@example.com"),
            ("2", "Jane Smith", "jane@example.com"),
        ]
        .into_iter()
        .map(|(id, name, email)| {
            (
                id.to_string(),
                UserRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    created_at: None,
                },
            )
        })
        .collect();

        Self { records }
    }

    /// Check a username/password pair against the login accounts.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<UserSummary> {
        let (name, account) = ACCOUNTS.iter().find(|(name, _)| *name == username)?;
        if account.password != password {
            return None;
        }

        Some(UserSummary {
            id: account.id.to_string(),
            username: name.to_string(),
            email: account.email.to_string(),
            role: account.role.to_string(),
        })
    }

    /// All records, ordered by creation with the seeded ones first.
    pub fn list_users(&self) -> Vec<UserRecord> {
        let mut users: Vec<UserRecord> = self.records.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        users
    }

    pub fn user_by_id(&self, id: &str) -> Option<UserRecord> {
        self.records.get(id).cloned()
    }

    pub fn create_user(&mut self, name: String, email: String) -> UserRecord {
        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            created_at: Some(iso_timestamp()),
        };
        self.records.insert(record.id.clone(), record.clone());
        record
    }
}
