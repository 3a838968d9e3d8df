// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logout command handler

use anyhow::Result;
use fv_client::{Config, SessionFile};

pub fn handle(config: &Config) -> Result<()> {
    SessionFile::new(&config.state_dir()).clear()?;
    println!("Logged out");
    Ok(())
}
