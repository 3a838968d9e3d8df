// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Login and session persistence.
//!
//! Authentication sits behind a trait so the credential source can change
//! without touching the run loop. The shipped provider checks against a
//! static roster from the config file; a saved session lets `watch` skip
//! the login prompt.

use fv_core::session::{LocationScope, Role, Session};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("operator {0} has no assigned location")]
    MissingLocation(String),
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Credential check boundary.
pub trait AuthProvider {
    fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError>;
}

/// One roster entry from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Checks credentials against a fixed roster.
pub struct StaticAuthProvider {
    users: Vec<UserRecord>,
}

impl StaticAuthProvider {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

impl AuthProvider for StaticAuthProvider {
    fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let record = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let scope = match (record.role, record.location.as_deref()) {
            (Role::Admin, _) => LocationScope::All,
            (Role::Operator, Some(location)) => LocationScope::One(location.to_string()),
            (Role::Operator, None) => {
                return Err(AuthError::MissingLocation(record.username.clone()))
            }
        };
        Ok(Session { username: record.username.clone(), role: record.role, scope })
    }
}

/// Saved session on disk, JSON under the state directory.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join("session.json") }
    }

    /// Platform state directory, `~/.local/state/floorview` on Linux.
    pub fn default_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("floorview")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    /// `None` when no session has been saved.
    pub fn load(&self) -> Result<Option<Session>, AuthError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
