// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator session: role and location scope.
//!
//! The engine depends only on this value — who issued it (static list,
//! real auth service) is the client's concern behind `AuthProvider`.

use serde::{Deserialize, Serialize};

/// What a logged-in user may do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Scoped to one location; may start/pause/stop jobs.
    #[default]
    Operator,
    /// Sees every location; may rename machines.
    Admin,
}

crate::simple_display! {
    Role {
        Operator => "operator",
        Admin => "admin",
    }
}

/// Which locations a session may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationScope {
    All,
    One(String),
}

impl LocationScope {
    pub fn allows(&self, location: &str) -> bool {
        match self {
            LocationScope::All => true,
            LocationScope::One(name) => name == location,
        }
    }
}

/// A logged-in user as the engine sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub scope: LocationScope,
}

impl Session {
    pub fn operator(username: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Operator,
            scope: LocationScope::One(location.into()),
        }
    }

    pub fn admin(username: impl Into<String>) -> Self {
        Self { username: username.into(), role: Role::Admin, scope: LocationScope::All }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
