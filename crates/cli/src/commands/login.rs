// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Login command handler

use anyhow::{Context, Result};
use fv_client::{AuthProvider, Config, SessionFile, StaticAuthProvider};
use std::io::{BufRead, Write};

pub fn handle(config: &Config, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let provider = StaticAuthProvider::new(config.users.clone());
    let session = provider.authenticate(username, &password)?;

    SessionFile::new(&config.state_dir()).save(&session)?;
    println!("Logged in as {} ({})", session.username, session.role);
    Ok(())
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("cannot read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
