// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod login;
pub mod logout;
pub mod logs;
pub mod machine;
pub mod watch;

use anyhow::{Context, Result};
use fv_client::{Config, SessionFile};
use fv_core::session::Session;

/// Load the saved session or fail with a login hint.
pub fn require_session(config: &Config) -> Result<Session> {
    SessionFile::new(&config.state_dir())
        .load()
        .context("cannot read saved session")?
        .context("not logged in (run `floorview login <username>`)")
}
